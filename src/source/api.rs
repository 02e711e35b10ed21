//! HTTP implementation of the content source

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{ContentSource, Document, QueryOptions, SearchPage, SortOrder};
use crate::config::SourceConfig;
use crate::error::{Error, Result};

/// Content source backed by a predicate-queryable document API over HTTP
pub struct ApiSource {
    client: Client,
    api_url: String,
    access_token: Option<String>,
}

impl ApiSource {
    /// Create a new API source from configuration
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(2))
            .build()
            .map_err(Error::unavailable)?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        })
    }

    fn search_endpoint(&self) -> String {
        format!("{}/documents/search", self.api_url)
    }

    /// Predicate selecting all documents of a type,
    /// e.g. `[[at(document.type,"posts")]]`
    fn type_predicate(doc_type: &str) -> String {
        format!(r#"[[at(document.type,"{}")]]"#, doc_type)
    }

    /// Predicate selecting a single document by uid,
    /// e.g. `[[at(my.posts.uid,"first-post")]]`
    fn uid_predicate(doc_type: &str, uid: &str) -> String {
        format!(r#"[[at(my.{}.uid,"{}")]]"#, doc_type, uid)
    }

    fn orderings_param(order: SortOrder) -> &'static str {
        match order {
            SortOrder::PublishedAsc => "[document.first_publication_date]",
            SortOrder::PublishedDesc => "[document.first_publication_date desc]",
        }
    }

    fn request_error(&self, e: reqwest::Error) -> Error {
        if e.is_connect() {
            Error::SourceUnavailable(format!("cannot connect to {}", self.api_url))
        } else {
            Error::unavailable(e)
        }
    }

    async fn get_search_page(&self, params: Vec<(&str, String)>) -> Result<SearchPage> {
        let response = self
            .client
            .get(self.search_endpoint())
            .query(&params)
            .send()
            .await
            .map_err(|e| self.request_error(e))?
            .error_for_status()
            .map_err(Error::unavailable)?;

        response
            .json::<SearchPage>()
            .await
            .map_err(|e| Error::unavailable(format!("invalid search response: {}", e)))
    }
}

#[async_trait]
impl ContentSource for ApiSource {
    async fn query(&self, doc_type: &str, options: QueryOptions) -> Result<SearchPage> {
        let mut params = vec![("q", Self::type_predicate(doc_type))];
        if let Some(size) = options.page_size {
            params.push(("pageSize", size.to_string()));
        }
        if let Some(after) = &options.after {
            params.push(("after", after.clone()));
        }
        if let Some(order) = options.order {
            params.push(("orderings", Self::orderings_param(order).to_string()));
        }
        if let Some(token) = &self.access_token {
            params.push(("access_token", token.clone()));
        }

        tracing::debug!("querying {} documents from {}", doc_type, self.api_url);
        self.get_search_page(params).await
    }

    async fn fetch_page(&self, page_url: &str) -> Result<SearchPage> {
        // The cursor URL is owned by the source and already carries its
        // full query string (token included); re-issue it verbatim.
        tracing::debug!("fetching continuation page {}", page_url);
        let response = self
            .client
            .get(page_url)
            .send()
            .await
            .map_err(|e| self.request_error(e))?
            .error_for_status()
            .map_err(Error::unavailable)?;

        response
            .json::<SearchPage>()
            .await
            .map_err(|e| Error::unavailable(format!("invalid search response: {}", e)))
    }

    async fn get_by_uid(&self, doc_type: &str, uid: &str) -> Result<Document> {
        let mut params = vec![
            ("q", Self::uid_predicate(doc_type, uid)),
            ("pageSize", "1".to_string()),
        ];
        if let Some(token) = &self.access_token {
            params.push(("access_token", token.clone()));
        }

        tracing::debug!("looking up {} '{}'", doc_type, uid);
        let page = self.get_search_page(params).await?;
        page.results
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(uid.to_string()))
    }
}
