//! Recovers a provider search key from a public CDN URL.
//!
//! The provider deletes by file id only, and ids are not part of public URLs.
//! The resolver turns a URL such as
//! `https://ik.imagekit.io/demo/products/product_1_shoe.png` into the folder
//! (`products`) and base name (`product_1_shoe`) used to search the listing
//! for the id. Purely lexical; no network access.

/// Folder and base name recovered from a CDN URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Segments before the file name, joined with `/`. Empty means the root.
    pub folder_path: String,
    /// File name up to its first `.`.
    pub base_name: String,
}

impl ResolvedPath {
    /// Folder to list when searching for the file.
    pub fn search_folder(&self) -> String {
        format!("/{}", self.folder_path)
    }

    /// Provider search expression matching the file by name.
    pub fn search_query(&self) -> String {
        format!("name=\"{}\"", self.base_name)
    }
}

/// Resolves CDN URLs under a fixed URL endpoint.
#[derive(Debug, Clone)]
pub struct ResourcePathResolver {
    endpoint: String,
}

impl ResourcePathResolver {
    /// Create a resolver for the given URL endpoint, e.g. `https://ik.imagekit.io/demo`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint: String = endpoint.into();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a CDN URL. Returns `None` when the URL is not under the endpoint
    /// or has no file name.
    pub fn resolve(&self, cdn_url: &str) -> Option<ResolvedPath> {
        if self.endpoint.is_empty() {
            return None;
        }

        let rest = cdn_url.trim().strip_prefix(&self.endpoint)?;
        // prefix must end on a segment boundary
        let rest = rest.strip_prefix('/')?;

        let path = rest.split(['?', '#']).next().unwrap_or_default();
        let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let file_name = segments.pop()?;
        let base_name = file_name.split('.').next().unwrap_or_default();
        // the name is quoted into the provider search expression
        if base_name.is_empty() || base_name.contains(['"', '\\']) {
            return None;
        }

        Some(ResolvedPath {
            folder_path: segments.join("/"),
            base_name: base_name.to_string(),
        })
    }
}
