//! dependor_path: Path normalization, extension handling and module specifiers.
//!
//! All paths are treated as `/`-separated strings. Nothing here touches the
//! file system.

/// Script extensions, used to pick a scanning dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extension {
    Ts,
    Tsx,
    Dts,
    Mts,
    Cts,
    Js,
    Jsx,
    Mjs,
    Cjs,
}

// Longest suffix first so `.d.ts` is not read as `.ts`.
const EXTENSIONS: &[(&str, Extension)] = &[
    (".d.ts", Extension::Dts),
    (".tsx", Extension::Tsx),
    (".mts", Extension::Mts),
    (".cts", Extension::Cts),
    (".ts", Extension::Ts),
    (".jsx", Extension::Jsx),
    (".mjs", Extension::Mjs),
    (".cjs", Extension::Cjs),
    (".js", Extension::Js),
];

impl Extension {
    /// Case-insensitive suffix match. `None` for anything that is not a script.
    pub fn from_path(path: &str) -> Option<Extension> {
        let lower = path.to_ascii_lowercase();
        EXTENSIONS
            .iter()
            .find(|(suffix, _)| lower.ends_with(suffix))
            .map(|&(_, ext)| ext)
    }

    pub fn is_jsx_capable(self) -> bool {
        matches!(self, Extension::Jsx | Extension::Tsx)
    }
}

/// Fold `.` and `..` segments and unify separators.
///
/// A relative path that folds away entirely becomes `"."`. Leading `..`
/// segments of a relative path are kept; above a root they are dropped.
pub fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            _ => parts.push(segment),
        }
    }
    let joined = parts.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// `/`-rooted or a drive root such as `C:/`.
pub fn is_rooted(path: &str) -> bool {
    match path.as_bytes() {
        [b'/', ..] => true,
        [drive, b':', b'/' | b'\\', ..] => drive.is_ascii_alphabetic(),
        _ => false,
    }
}

/// Append `relative` to `base` unless it is rooted itself.
pub fn combine_paths(base: &str, relative: &str) -> String {
    if base.is_empty() || is_rooted(relative) {
        return relative.to_string();
    }
    if base.ends_with(['/', '\\']) {
        format!("{base}{relative}")
    } else {
        format!("{base}/{relative}")
    }
}

/// `./x`, `../x`, `.` or `..`.
pub fn is_relative_specifier(specifier: &str) -> bool {
    matches!(specifier, "." | "..") || specifier.starts_with("./") || specifier.starts_with("../")
}

/// Resolve a module specifier against the directory of the importing file.
///
/// Relative specifiers are joined onto `base_dir` and normalized. Anything
/// else (`fs`, `@scope/pkg`, `~/path`) is a package or alias and is returned
/// verbatim.
pub fn resolve_specifier(base_dir: &str, specifier: &str) -> String {
    if is_relative_specifier(specifier) {
        normalize_path(&combine_paths(base_dir, specifier))
    } else {
        specifier.to_string()
    }
}
