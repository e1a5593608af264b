use pgfilter_schema::{
    Catalog,
    node::{Class, Procedure},
};

pub(crate) const BLOG_SNAPSHOT: &str = include_str!("../tests/fixtures/blog.json");

pub(crate) const SHOP_SNAPSHOT: &str = include_str!("../tests/fixtures/shop.json");

pub(crate) fn blog_catalog() -> Catalog {
    Catalog::from_json_str(BLOG_SNAPSHOT).expect("blog fixture loads")
}

pub(crate) fn shop_catalog() -> Catalog {
    Catalog::from_json_str(SHOP_SNAPSHOT).expect("shop fixture loads")
}

pub(crate) fn table<'a>(catalog: &'a Catalog, name: &str) -> &'a Class {
    catalog
        .class_by_name(Some("app"), name)
        .expect("fixture table exists")
}

pub(crate) fn procedure<'a>(catalog: &'a Catalog, name: &str) -> &'a Procedure {
    catalog
        .procedures()
        .iter()
        .find(|p| p.name == name)
        .expect("fixture procedure exists")
}
