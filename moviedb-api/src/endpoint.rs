//! Endpoint URL construction

use url::Url;

/// Language sent with every request unless overridden.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// The four list endpoints moviedb reads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Popular,
    TopRated,
    Upcoming,
    Search { query: String, page: u32 },
}

impl Endpoint {
    /// Search endpoint for the first page of results.
    pub fn search(query: impl Into<String>) -> Self {
        Endpoint::Search {
            query: query.into(),
            page: 1,
        }
    }

    /// Path relative to the API base (`.../3/`).
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Popular => "movie/popular",
            Endpoint::TopRated => "movie/top_rated",
            Endpoint::Upcoming => "movie/upcoming",
            Endpoint::Search { .. } => "search/movie",
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Popular => "popular",
            Endpoint::TopRated => "top_rated",
            Endpoint::Upcoming => "upcoming",
            Endpoint::Search { .. } => "search",
        }
    }

    /// Build the full request URL.
    ///
    /// Query parameters are appended as `api_key`, `language`, then `query`
    /// (search only) and `page`. The listings always ask for page 1.
    pub fn url(&self, base: &Url, api_key: &str, language: &str) -> Result<Url, url::ParseError> {
        let mut url = base.join(self.path())?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api_key", api_key);
            query.append_pair("language", language);
            match self {
                Endpoint::Search { query: text, page } => {
                    query.append_pair("query", text);
                    query.append_pair("page", &page.to_string());
                }
                _ => {
                    query.append_pair("page", "1");
                }
            }
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://api.themoviedb.org/3/").unwrap()
    }

    #[test]
    fn test_listing_urls() {
        let url = Endpoint::Popular.url(&base(), "KEY", "en-US").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.themoviedb.org/3/movie/popular?api_key=KEY&language=en-US&page=1"
        );

        let url = Endpoint::TopRated.url(&base(), "KEY", "en-US").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.themoviedb.org/3/movie/top_rated?api_key=KEY&language=en-US&page=1"
        );

        let url = Endpoint::Upcoming.url(&base(), "KEY", "en-US").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.themoviedb.org/3/movie/upcoming?api_key=KEY&language=en-US&page=1"
        );
    }

    #[test]
    fn test_search_url_encodes_query() {
        let url = Endpoint::search("The Matrix & co")
            .url(&base(), "KEY", "en-US")
            .unwrap();

        assert_eq!(url.path(), "/3/search/movie");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("api_key".into(), "KEY".into()),
                ("language".into(), "en-US".into()),
                ("query".into(), "The Matrix & co".into()),
                ("page".into(), "1".into()),
            ]
        );
    }

    #[test]
    fn test_empty_api_key_is_sent_as_is() {
        let url = Endpoint::Popular.url(&base(), "", "en-US").unwrap();
        assert!(url.as_str().contains("api_key=&"));
    }

    #[test]
    fn test_base_without_trailing_slash_drops_last_segment() {
        // Url::join semantics: the base must end with '/'
        let base = Url::parse("https://api.themoviedb.org/3").unwrap();
        let url = Endpoint::Popular.url(&base, "KEY", "en-US").unwrap();
        assert_eq!(url.path(), "/movie/popular");
    }
}
