//! Import specifier resolution to files on disk.
//!
//! Relative and absolute specifiers resolve against the importing file's
//! directory. Alias specifiers (`@/components/Button`, `~/lib`, `#utils`)
//! go through an [`AliasTable`], either supplied explicitly or read from the
//! nearest `tsconfig.json`. Extension-less results are probed in a fixed
//! order, first as files and then as directory `index` files.
//!
//! This is the only part of the linter that touches the filesystem while
//! rules run.

use std::collections::{BTreeMap, HashMap};
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde_json::Value;
use tracing::debug;

/// Characters that mark a specifier as a candidate path alias.
pub const ALIAS_PREFIXES: &[char] = &['@', '~', '#'];

/// Extensions probed for extension-less specifiers, in priority order.
pub const PROBE_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js"];

/// Extensions that make a specifier "already resolved": the exact path must exist.
pub const KNOWN_EXTENSIONS: &[&str] = &[
    "tsx", "ts", "jsx", "js", "mjs", "cjs", "mts", "cts", "json", "css", "scss", "sass", "less",
];

const TSCONFIG: &str = "tsconfig.json";
const PROJECT_MARKERS: &[&str] = &["package.json", TSCONFIG];

/// Mapping from alias prefix to absolute base directory.
///
/// Entries are kept longest prefix first so that `@components` wins over `@`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<(String, PathBuf)>,
}

impl AliasTable {
    /// Builds a table from `(prefix, base)` pairs.
    ///
    /// A trailing `/*` or `/` is stripped from prefixes and a trailing `/*`
    /// from targets.
    #[must_use]
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, PathBuf)>,
    {
        let mut entries: Vec<_> = entries
            .into_iter()
            .map(|(prefix, base)| (clean_prefix(&prefix).to_owned(), strip_wildcard_path(&base)))
            .filter(|(prefix, _)| !prefix.is_empty())
            .collect();
        // stable: equal lengths keep their original order
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { entries }
    }

    /// Builds a table from explicitly configured aliases.
    ///
    /// Relative targets are resolved against the nearest ancestor of
    /// `from_dir` containing `package.json` or `tsconfig.json`, or `from_dir`
    /// itself when no such ancestor exists.
    #[must_use]
    pub fn from_explicit(aliases: &BTreeMap<String, String>, from_dir: &Path) -> Self {
        let root = find_project_root(from_dir).unwrap_or(from_dir);
        Self::new(aliases.iter().map(|(prefix, target)| {
            let target = Path::new(target);
            let base = if target.is_absolute() {
                target.to_path_buf()
            } else {
                root.join(target)
            };
            (prefix.clone(), normalize_path(&base))
        }))
    }

    /// Reads `compilerOptions.paths` from a tsconfig file.
    ///
    /// Unreadable or malformed files yield an empty table.
    #[must_use]
    pub fn from_tsconfig(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!("cannot read {}: {e}", path.display());
                return Self::default();
            }
        };
        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        match Self::parse_tsconfig(&content, dir) {
            Some(table) => table,
            None => {
                debug!("ignoring malformed {}", path.display());
                Self::default()
            }
        }
    }

    /// Parses tsconfig text whose file lives in `dir`.
    fn parse_tsconfig(content: &str, dir: &Path) -> Option<Self> {
        let json: Value = serde_json::from_str(&strip_json_comments(content)).ok()?;
        let options = json.get("compilerOptions");
        let Some(paths) = options.and_then(|o| o.get("paths")) else {
            return Some(Self::default());
        };
        let base_url = options
            .and_then(|o| o.get("baseUrl"))
            .and_then(Value::as_str)
            .unwrap_or(".");
        let base = dir.join(base_url);

        let mut entries = Vec::new();
        for (prefix, targets) in paths.as_object()? {
            let target = match targets {
                Value::Array(items) => items.first().and_then(Value::as_str),
                Value::String(s) => Some(s.as_str()),
                _ => None,
            };
            let Some(target) = target else { continue };
            let target = target.strip_suffix("/*").unwrap_or(target);
            entries.push((prefix.clone(), normalize_path(&base.join(target))));
        }
        Some(Self::new(entries))
    }

    /// Substitutes the longest matching prefix of `specifier`.
    ///
    /// A prefix matches when it equals the specifier or is followed by `/`.
    #[must_use]
    pub fn lookup(&self, specifier: &str) -> Option<PathBuf> {
        self.entries.iter().find_map(|(prefix, base)| {
            let rest = specifier.strip_prefix(prefix.as_str())?;
            if rest.is_empty() {
                Some(base.clone())
            } else if let Some(rest) = rest.strip_prefix('/') {
                Some(normalize_path(&base.join(rest)))
            } else {
                None
            }
        })
    }

    /// Number of aliases in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no aliases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn clean_prefix(prefix: &str) -> &str {
    let prefix = prefix.strip_suffix("/*").unwrap_or(prefix);
    if prefix.len() > 1 {
        prefix.strip_suffix('/').unwrap_or(prefix)
    } else {
        prefix
    }
}

fn strip_wildcard_path(path: &Path) -> PathBuf {
    if path.file_name().and_then(|n| n.to_str()) == Some("*") {
        path.parent().map_or_else(PathBuf::new, Path::to_path_buf)
    } else {
        path.to_path_buf()
    }
}

/// Per-directory cache of tsconfig-derived alias tables.
///
/// Entries are never invalidated. Concurrent misses for the same directory
/// may both compute the table; the results are identical.
#[derive(Debug, Default)]
pub struct AliasCache {
    tables: RwLock<HashMap<PathBuf, Arc<AliasTable>>>,
}

impl AliasCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the alias table for files in `dir`, loading it on a miss.
    pub fn get_or_load(&self, dir: &Path) -> Arc<AliasTable> {
        if let Some(table) = self.tables.read().ok().and_then(|t| t.get(dir).cloned()) {
            return table;
        }

        let table = Arc::new(
            find_ancestor_with(dir, TSCONFIG)
                .map(|config| AliasTable::from_tsconfig(&config))
                .unwrap_or_default(),
        );
        debug!("loaded {} alias(es) for {}", table.len(), dir.display());

        if let Ok(mut tables) = self.tables.write() {
            tables.insert(dir.to_path_buf(), Arc::clone(&table));
        }
        table
    }

    /// Number of cached directories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.read().map_or(0, |t| t.len())
    }

    /// Returns true if nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolves import specifiers to existing files.
///
/// Construct one per lint run and share it between files.
#[derive(Debug, Default)]
pub struct ImportResolver {
    cache: AliasCache,
}

impl ImportResolver {
    /// Creates a resolver with an empty alias cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The tsconfig alias cache owned by this resolver.
    #[must_use]
    pub fn cache(&self) -> &AliasCache {
        &self.cache
    }

    /// Resolves `specifier` as imported from `from_file`.
    ///
    /// Returns `None` for package imports, unmatched aliases and paths that
    /// do not exist. `explicit_aliases`, when given, replaces the tsconfig
    /// table entirely.
    ///
    /// ```no_run
    /// use purelint_core::resolver::ImportResolver;
    /// use std::path::Path;
    ///
    /// let resolver = ImportResolver::new();
    /// let target = resolver.resolve("./Button", Path::new("/app/src/util.ts"), None);
    /// ```
    #[must_use]
    pub fn resolve(
        &self,
        specifier: &str,
        from_file: &Path,
        explicit_aliases: Option<&BTreeMap<String, String>>,
    ) -> Option<PathBuf> {
        let from_dir = from_file.parent().unwrap_or_else(|| Path::new(""));

        let base = if specifier.starts_with('.') || specifier.starts_with('/') {
            normalize_path(&from_dir.join(specifier))
        } else if specifier.starts_with(ALIAS_PREFIXES) {
            let resolved = match explicit_aliases {
                Some(aliases) => AliasTable::from_explicit(aliases, from_dir).lookup(specifier),
                None => self.cache.get_or_load(from_dir).lookup(specifier),
            };
            resolved?
        } else {
            return None;
        };

        if has_known_extension(specifier) {
            return base.is_file().then_some(base);
        }
        probe(&base)
    }
}

fn has_known_extension(specifier: &str) -> bool {
    Path::new(specifier)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| KNOWN_EXTENSIONS.contains(&ext))
}

fn probe(base: &Path) -> Option<PathBuf> {
    let mut file_candidates = PROBE_EXTENSIONS.iter().map(|ext| {
        let mut candidate = base.as_os_str().to_owned();
        candidate.push(".");
        candidate.push(ext);
        PathBuf::from(candidate)
    });
    if let Some(found) = file_candidates.find(|p| p.is_file()) {
        return Some(found);
    }
    PROBE_EXTENSIONS
        .iter()
        .map(|ext| base.join(format!("index.{ext}")))
        .find(|p| p.is_file())
}

fn find_ancestor_with(dir: &Path, marker: &str) -> Option<PathBuf> {
    dir.ancestors()
        .map(|d| d.join(marker))
        .find(|candidate| candidate.is_file())
}

fn find_project_root(dir: &Path) -> Option<&Path> {
    dir.ancestors()
        .find(|d| PROJECT_MARKERS.iter().any(|m| d.join(m).is_file()))
}

/// Lexically normalizes a path, folding `.` and `..` components.
///
/// `..` never climbs above the root or a leading prefix.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            _ => out.push(component),
        }
    }
    out.iter().collect()
}

/// Makes tsconfig text parseable as strict JSON: drops `//` and `/* */`
/// comments, then trailing commas. String contents are left untouched.
fn strip_json_comments(input: &str) -> String {
    strip_trailing_commas(&strip_comments(input))
}

fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => out.extend(chars.next()),
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek()) {
            ('/', Some('/')) => {
                if chars.by_ref().any(|next| next == '\n') {
                    out.push('\n');
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
                out.push(' ');
            }
            _ => {
                in_string = c == '"';
                out.push(c);
            }
        }
    }
    out
}

fn strip_trailing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => out.extend(chars.next()),
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        if c == ',' {
            let next = chars.clone().find(|ch| !ch.is_whitespace());
            if matches!(next, Some('}' | ']')) {
                continue;
            }
        }
        in_string = c == '"';
        out.push(c);
    }
    out
}
