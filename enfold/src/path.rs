//! Page path validation and expansion into template chains.
//!
//! A page path like `"blog/posts/first"` identifies the leaf template plus
//! every layout enclosing it: `"blog/posts"`, `"blog"`, and the root layout
//! registered under the empty string. Equivalent spellings of the same path
//! normalize to the same chain.
use crate::error::Error;
use crate::registry::Templates;

/// Templates registered under a name starting with this character live
/// outside the page hierarchy.
pub const STANDALONE_MARKER: char = '$';

/// Name of the root layout in the pages registry.
pub(crate) const ROOT: &str = "";

/// Normalize a page path: lowercase, forward slashes, no repeated or
/// surrounding separators. Fails with [`Error::NotFound`] for paths that
/// are empty, escape the template root, or carry the standalone marker.
pub fn normalize(path: &str) -> Result<String, Error> {
    let path = path.trim().to_lowercase().replace('\\', "/");

    let mut segments = vec![];
    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return Err(Error::NotFound(path.clone())),
            segment if segment.starts_with(STANDALONE_MARKER) => {
                return Err(Error::NotFound(path.clone()))
            }
            segment => segments.push(segment),
        }
    }

    if segments.is_empty() {
        return Err(Error::NotFound(path));
    }

    Ok(segments.join("/"))
}

/// Expand a normalized path into the ordered list of templates to compose,
/// from the leaf up to the root layout.
pub fn chain(path: &str) -> Vec<String> {
    let mut paths = vec![path.to_string()];
    let mut current = path;

    while let Some((parent, _)) = current.rsplit_once('/') {
        paths.push(parent.to_string());
        current = parent;
    }

    paths.push(ROOT.to_string());
    paths
}

/// Validate a page path against the registry and expand it into its
/// template chain. The leaf and the root layout must both be registered;
/// enclosing layouts are looked up at render time.
pub fn resolve(path: &str, pages: &Templates) -> Result<(String, Vec<String>), Error> {
    let path = normalize(path)?;

    if !pages.contains(&path) {
        return Err(Error::NotFound(path));
    }

    if !pages.contains(ROOT) {
        return Err(Error::NotFound(ROOT.to_string()));
    }

    let chain = chain(&path);

    Ok((path, chain))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::context::Context;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("blog/posts").unwrap(), "blog/posts");
        assert_eq!(normalize("/blog/posts/").unwrap(), "blog/posts");
        assert_eq!(normalize("Blog//Posts").unwrap(), "blog/posts");
        assert_eq!(normalize("blog\\posts").unwrap(), "blog/posts");
        assert_eq!(normalize("./blog/./posts").unwrap(), "blog/posts");

        assert!(normalize("").is_err());
        assert!(normalize("  ").is_err());
        assert!(normalize("/").is_err());
        assert!(normalize("../etc/passwd").is_err());
        assert!(normalize("blog/../../etc").is_err());
        assert!(normalize("$partial").is_err());
        assert!(normalize("blog/$partial").is_err());
    }

    #[test]
    fn test_chain() {
        assert_eq!(chain("a/b/c"), vec!["a/b/c", "a/b", "a", ""]);
        assert_eq!(chain("a"), vec!["a", ""]);
    }

    #[test]
    fn test_chain_deterministic_across_spellings() {
        let registry = registry();

        let (path, chain) = resolve("blog/posts", &registry).unwrap();
        for spelling in ["/blog/posts", "blog/posts/", "Blog//Posts", "blog\\posts"] {
            let (other_path, other_chain) = resolve(spelling, &registry).unwrap();
            assert_eq!(other_path, path);
            assert_eq!(other_chain, chain);
        }
    }

    #[test]
    fn test_resolve_requires_leaf_and_root() {
        let registry = registry();

        assert!(resolve("blog/posts", &registry).is_ok());
        assert!(matches!(
            resolve("blog/missing", &registry),
            Err(Error::NotFound(_))
        ));

        let mut rootless = Templates::new();
        rootless.insert("blog/posts", |_: &Context| -> Result<String, Error> {
            Ok("".to_string())
        });
        assert!(matches!(
            resolve("blog/posts", &rootless),
            Err(Error::NotFound(_))
        ));
    }

    fn registry() -> Templates {
        let mut registry = Templates::new();
        for name in ["", "blog", "blog/posts"] {
            registry.insert(name, |_: &Context| -> Result<String, Error> {
                Ok("".to_string())
            });
        }
        registry
    }
}
