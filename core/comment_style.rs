use std::path::Path;

/// Comment syntax used for the `file: <path>` header line above each file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    Hash,
    DoubleSlash,
    Html,
    Block,
    DoubleDash,
    Semicolon,
    DoubleColon,
    Bang,
    Percent,
}

impl CommentStyle {
    pub fn header(self, path: &str) -> String {
        match self {
            CommentStyle::Hash => format!("# file: {}", path),
            CommentStyle::DoubleSlash => format!("// file: {}", path),
            CommentStyle::Html => format!("<!-- file: {} -->", path),
            CommentStyle::Block => format!("/* file: {} */", path),
            CommentStyle::DoubleDash => format!("-- file: {}", path),
            CommentStyle::Semicolon => format!(";; file: {}", path),
            CommentStyle::DoubleColon => format!(":: file: {}", path),
            CommentStyle::Bang => format!("! file: {}", path),
            CommentStyle::Percent => format!("% file: {}", path),
        }
    }
}

// Maps a lowercase extension (leading dot included) to its comment style.
// Unknown extensions fall back to C-style line comments.
pub fn style_for_extension(extension: &str) -> CommentStyle {
    match extension {
        // Hash comments: scripting, shell and config formats
        ".py" | ".pyi" | ".rb" | ".pl" | ".pm" | ".sh" | ".bash" | ".zsh" | ".fish" | ".ps1"
        | ".r" | ".jl" | ".nim" | ".cr" | ".ex" | ".exs" | ".tcl" | ".cmake" | ".mk"
        | ".yaml" | ".yml" | ".toml" | ".ini" | ".cfg" | ".conf" | ".env" | ".properties"
        | ".dockerfile" | ".tf" | ".nix" | ".awk" => CommentStyle::Hash,

        // C-family line comments
        ".go" | ".js" | ".mjs" | ".cjs" | ".jsx" | ".ts" | ".tsx" | ".c" | ".h" | ".cc"
        | ".cpp" | ".cxx" | ".hpp" | ".rs" | ".java" | ".kt" | ".kts" | ".scala" | ".swift"
        | ".cs" | ".fs" | ".dart" | ".php" | ".proto" | ".zig" | ".v" | ".groovy"
        | ".gradle" | ".json5" => CommentStyle::DoubleSlash,

        // Markup
        ".html" | ".htm" | ".xml" | ".svg" | ".xhtml" | ".vue" | ".md" | ".markdown" => {
            CommentStyle::Html
        }

        // Stylesheets
        ".css" | ".scss" | ".sass" | ".less" => CommentStyle::Block,

        ".sql" | ".lua" | ".hs" | ".elm" | ".ada" | ".adb" | ".ads" => CommentStyle::DoubleDash,

        // Lisp family
        ".clj" | ".cljs" | ".cljc" | ".edn" | ".el" | ".lisp" | ".scm" | ".rkt" => {
            CommentStyle::Semicolon
        }

        ".bat" | ".cmd" => CommentStyle::DoubleColon,

        ".f" | ".f90" | ".f95" | ".f03" | ".f08" => CommentStyle::Bang,

        ".tex" | ".sty" | ".erl" | ".hrl" | ".m" => CommentStyle::Percent,

        _ => CommentStyle::DoubleSlash,
    }
}

/// Makefiles are recognised by name before the extension is considered.
pub fn style_for_path(path: &Path) -> CommentStyle {
    if is_makefile(path) {
        return CommentStyle::Hash;
    }
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default();
    style_for_extension(&extension)
}

fn is_makefile(path: &Path) -> bool {
    matches!(
        path.file_stem().and_then(|stem| stem.to_str()),
        Some("Makefile") | Some("makefile")
    )
}

/// Header line for `display_path`, styled from `matched_path`.
pub fn header_for(matched_path: &Path, display_path: &str) -> String {
    style_for_path(matched_path).header(display_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_extension_headers() {
        let cases = [
            ("a.py", "# file: a.py"),
            ("a.sh", "# file: a.sh"),
            ("a.yaml", "# file: a.yaml"),
            ("a.toml", "# file: a.toml"),
            ("a.go", "// file: a.go"),
            ("a.rs", "// file: a.rs"),
            ("a.java", "// file: a.java"),
            ("a.html", "<!-- file: a.html -->"),
            ("a.svg", "<!-- file: a.svg -->"),
            ("a.scss", "/* file: a.scss */"),
            ("a.sql", "-- file: a.sql"),
            ("a.clj", ";; file: a.clj"),
            ("a.cmd", ":: file: a.cmd"),
            ("a.f90", "! file: a.f90"),
        ];
        for (path, expected) in cases {
            assert_eq!(header_for(Path::new(path), path), expected, "path {}", path);
        }
    }

    #[test]
    fn extension_lookup_is_case_insensitive() {
        assert_eq!(style_for_path(Path::new("SCRIPT.PY")), CommentStyle::Hash);
        assert_eq!(style_for_path(Path::new("Index.HTML")), CommentStyle::Html);
    }

    #[test]
    fn unknown_and_missing_extensions_default_to_double_slash() {
        assert_eq!(style_for_path(Path::new("data.xyz")), CommentStyle::DoubleSlash);
        assert_eq!(style_for_path(Path::new("LICENSE")), CommentStyle::DoubleSlash);
    }

    #[test]
    fn makefile_wins_over_extension() {
        assert_eq!(style_for_path(Path::new("Makefile")), CommentStyle::Hash);
        assert_eq!(style_for_path(Path::new("sub/makefile")), CommentStyle::Hash);
        assert_eq!(style_for_path(Path::new("Makefile.go")), CommentStyle::Hash);
        assert_eq!(style_for_path(Path::new("MAKEFILE")), CommentStyle::DoubleSlash);
    }

    #[test]
    fn header_uses_display_path() {
        assert_eq!(
            header_for(Path::new("/abs/dir/main.go"), "dir/main.go"),
            "// file: dir/main.go"
        );
    }
}
