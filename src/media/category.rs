//! Category tags and the folders they map to.

use std::fmt;

/// Logical category of an image, selecting its storage folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Product,
    Brand,
    Doctor,
    Banner,
    Blog,
    ReferenceBook,
    Disease,
    Category,
    User,
    General,
}

/// Tag and folder for each category, indexed by discriminant.
const TABLE: [(&str, &str); 10] = [
    ("product", "/products"),
    ("brand", "/brands"),
    ("doctor", "/doctors"),
    ("banner", "/banners"),
    ("blog", "/blogs"),
    ("reference-book", "/reference-books"),
    ("disease", "/diseases"),
    ("category", "/categories"),
    ("user", "/users"),
    ("general", "/general"),
];

const ALL: [Category; 10] = [
    Category::Product,
    Category::Brand,
    Category::Doctor,
    Category::Banner,
    Category::Blog,
    Category::ReferenceBook,
    Category::Disease,
    Category::Category,
    Category::User,
    Category::General,
];

/// Tag used when the caller does not send one.
pub const DEFAULT_TAG: &str = "general";

impl Category {
    /// All categories in table order.
    pub fn all() -> impl Iterator<Item = Category> {
        ALL.into_iter()
    }

    /// Look up a tag. Returns `None` for unknown tags.
    pub fn lookup(tag: &str) -> Option<Category> {
        ALL.into_iter().find(|category| category.tag() == tag)
    }

    /// Resolve an optional tag, falling back to [`Category::General`].
    pub fn resolve(tag: Option<&str>) -> Category {
        tag.and_then(Category::lookup).unwrap_or(Category::General)
    }

    /// The tag string for this category.
    pub fn tag(self) -> &'static str {
        TABLE[self as usize].0
    }

    /// Storage folder for this category.
    pub fn folder(self) -> &'static str {
        TABLE[self as usize].1
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
