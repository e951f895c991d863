//! The informational page served at `/`.
//!
//! The page is an ordinary HTML file (by default `pages/root.html`) read
//! once at startup. When the file is missing or unreadable the built-in
//! [`DEFAULT_ROOT_PAGE`] is served instead; the page is informational only,
//! so its absence never blocks startup.

use std::io::ErrorKind;
use std::path::Path;

use axum::body::Bytes;
use tracing::{info, warn};

/// Built-in root page listing the available resources.
pub const DEFAULT_ROOT_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Box Office Catalog</title>
    <style>
        body {
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }
        h1 { color: #58a6ff; margin-bottom: 0.25rem; }
        .subtitle { color: #8b949e; margin-top: 0; }
        a { color: #58a6ff; text-decoration: none; }
        a:hover { text-decoration: underline; }
        ul { list-style: none; padding: 0; }
        li { padding: 0.3rem 0; }
        li::before { content: "GET "; color: #7ee787; font-weight: bold; }
        hr { border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }
    </style>
</head>
<body>
    <h1>Box Office Catalog</h1>
    <p class="subtitle">Read-only box-office sales, indexed by studio, genre, and rating</p>

    <hr>

    <h2>Collections</h2>
    <ul>
        <li><a href="/movies">/movies</a> -- All movie records</li>
        <li><a href="/studios">/studios</a> -- Distinct studios</li>
        <li><a href="/genres">/genres</a> -- Distinct genres</li>
        <li><a href="/ratings">/ratings</a> -- Distinct ratings</li>
    </ul>

    <h2>Entries</h2>
    <ul>
        <li>/{index}/{name} -- Total revenue, ticket sales, and number of movies</li>
        <li>/{index}/{name}/movies -- Movies in that studio, genre, or rating</li>
    </ul>
</body>
</html>
"#;

/// Read the root page from `path`, falling back to [`DEFAULT_ROOT_PAGE`].
pub fn load_root_page(path: &Path) -> Bytes {
    match std::fs::read(path) {
        Ok(contents) => {
            info!(path = %path.display(), bytes = contents.len(), "root page loaded");
            Bytes::from(contents)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "root page not found, using built-in page");
            Bytes::from_static(DEFAULT_ROOT_PAGE.as_bytes())
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read root page, using built-in page");
            Bytes::from_static(DEFAULT_ROOT_PAGE.as_bytes())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_default() {
        let path = std::env::temp_dir().join("boxoffice-page-missing.html");
        let page = load_root_page(&path);
        assert_eq!(page, Bytes::from_static(DEFAULT_ROOT_PAGE.as_bytes()));
    }

    #[test]
    fn reads_page_from_disk() {
        let path = std::env::temp_dir().join(format!("boxoffice-page-{}.html", std::process::id()));
        let written = std::fs::write(&path, "<h1>custom</h1>");
        assert!(written.is_ok());
        let page = load_root_page(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(page, Bytes::from_static(b"<h1>custom</h1>"));
    }

    #[test]
    fn default_page_links_every_collection() {
        for link in ["/movies", "/studios", "/genres", "/ratings"] {
            assert!(DEFAULT_ROOT_PAGE.contains(&format!("href=\"{link}\"")));
        }
    }
}
