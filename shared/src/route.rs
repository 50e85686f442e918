/// Logical screen derived from the URL fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Home,
    Article(String),
    About,
}

impl Route {
    /// Parse a fragment such as `#/article/a1`. Unknown shapes fall back to
    /// [`Route::Home`].
    pub fn parse(fragment: &str) -> Self {
        let path = fragment.strip_prefix('#').unwrap_or(fragment);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["articles", ..] => Route::Home,
            ["about", ..] => Route::About,
            ["article", rest @ ..] if !rest.is_empty() => {
                let joined = rest.join("/");
                let id = urlencoding::decode(&joined)
                    .map(|v| v.into_owned())
                    .unwrap_or(joined);
                if id.is_empty() {
                    Route::Home
                } else {
                    Route::Article(id)
                }
            },
            _ => Route::Home,
        }
    }

    /// Fragment that parses back to this route.
    pub fn to_fragment(&self) -> String {
        match self {
            Route::Home => "#/".to_string(),
            Route::About => "#/about".to_string(),
            Route::Article(id) => format!("#/article/{}", urlencoding::encode(id)),
        }
    }

    pub fn article_id(&self) -> Option<&str> {
        match self {
            Route::Article(id) => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_list_paths_are_home() {
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("#"), Route::Home);
        assert_eq!(Route::parse("#/"), Route::Home);
        assert_eq!(Route::parse("#/articles"), Route::Home);
        assert_eq!(Route::parse("#/articles/2024"), Route::Home);
    }

    #[test]
    fn about_and_article_paths() {
        assert_eq!(Route::parse("#/about"), Route::About);
        assert_eq!(Route::parse("#//about/"), Route::About);
        assert_eq!(Route::parse("#/article/a1"), Route::Article("a1".into()));
    }

    #[test]
    fn article_ids_keep_slashes_and_are_decoded() {
        assert_eq!(
            Route::parse("#/article/2024/brief%20one"),
            Route::Article("2024/brief one".into())
        );
        assert_eq!(Route::parse("#/article/%E4%BD%A0%E5%A5%BD"), Route::Article("你好".into()));
    }

    #[test]
    fn other_shapes_fall_back_to_home() {
        assert_eq!(Route::parse("#/article"), Route::Home);
        assert_eq!(Route::parse("#/article/"), Route::Home);
        assert_eq!(Route::parse("#/settings"), Route::Home);
        assert_eq!(Route::parse("garbage"), Route::Home);
    }

    #[test]
    fn fragments_parse_back() {
        for route in [Route::Home, Route::About, Route::Article("a b/c".into())] {
            assert_eq!(Route::parse(&route.to_fragment()), route);
        }
    }
}
