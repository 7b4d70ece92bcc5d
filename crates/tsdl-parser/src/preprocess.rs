//! Text rewrites applied to a declaration file after it is read and before
//! it is parsed.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

/// A pure source-text transform.
pub trait PreProcess {
    fn name(&self) -> &str;
    fn apply(&self, source: &str) -> String;
}

/// Removes `/*! ... */` license banners and `/// <reference ... />` lines
/// from TypeScript's bundled lib files.
#[derive(Debug, Clone, Copy, Default)]
pub struct StripTsLibHeaders;

static BANNER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*!.*?\*/").expect("valid regex"));
static REFERENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"///\s*<reference.*/>").expect("valid regex"));
static BARE_DECLARATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(interface|declare|type)\b").expect("valid regex"));
static EXPORT_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^export\b").expect("valid regex"));

impl PreProcess for StripTsLibHeaders {
    fn name(&self) -> &str {
        "ts-lib"
    }

    fn apply(&self, source: &str) -> String {
        let text = BANNER_RE.replace_all(source, "");
        REFERENCE_RE.replace_all(&text, "").into_owned()
    }
}

/// Turns line-start `interface`, `declare` and `type` declarations into
/// exported ones so script-scope lib files become modules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportDeclarations;

impl PreProcess for ExportDeclarations {
    fn name(&self) -> &str {
        "export-declarations"
    }

    fn apply(&self, source: &str) -> String {
        BARE_DECLARATION_RE
            .replace_all(source, "export $1")
            .into_owned()
    }
}

/// A configured regex rewrite (`replacement` may use `$1` / `${name}`).
#[derive(Debug, Clone)]
pub struct RegexRewrite {
    pattern: Regex,
    replacement: String,
}

impl RegexRewrite {
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
        })
    }
}

impl PreProcess for RegexRewrite {
    fn name(&self) -> &str {
        self.pattern.as_str()
    }

    fn apply(&self, source: &str) -> String {
        self.pattern
            .replace_all(source, self.replacement.as_str())
            .into_owned()
    }
}

/// Run `steps` in order, then export-ify bare declarations.
pub fn run_pipeline(source: &str, steps: &[Box<dyn PreProcess>]) -> String {
    let mut text = source.to_string();
    for step in steps {
        trace!(step = step.name(), "pre-process");
        text = step.apply(&text);
    }
    ExportDeclarations.apply(&text)
}

/// Whether any line starts with `export`.
pub fn has_exports(source: &str) -> bool {
    EXPORT_LINE_RE.is_match(source)
}
