use globset::{GlobBuilder, GlobMatcher};

/// A configuration key compiled for matching a single path component.
///
/// Keys are glob patterns. A key without `/` is matched against the last
/// `/`-separated segment of the component, so `Contract.method` also matches
/// `lib/Contract.method`. A leading `!` inverts the result.
/// Unlike minimatch, `*` and `?` also match a leading `.`.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    negated: bool,
    base_only: bool,
    matcher: Option<GlobMatcher>,
}

impl Pattern {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let bangs = source.chars().take_while(|c| *c == '!').count();
        let body = &source[bangs..];

        let matcher = match GlobBuilder::new(body).literal_separator(true).build() {
            Ok(glob) => Some(glob.compile_matcher()),
            Err(err) => {
                log::warn!("pattern `{source}` is not a valid glob, matching it literally: {err}");
                None
            }
        };

        Self {
            negated: bangs % 2 == 1,
            base_only: !body.contains('/'),
            matcher,
            source,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, component: &str) -> bool {
        let target = if self.base_only {
            basename(component)
        } else {
            component
        };

        let hit = match &self.matcher {
            Some(matcher) => matcher.is_match(target),
            None => self.body() == target,
        };

        hit != self.negated
    }

    fn body(&self) -> &str {
        self.source.trim_start_matches('!')
    }
}

fn basename(component: &str) -> &str {
    component.rsplit('/').next().unwrap_or(component)
}
