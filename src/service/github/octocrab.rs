//! GitHub REST integration backed by `octocrab`.

use std::sync::Arc;

use async_trait::async_trait;
use ::octocrab::{Octocrab, models::IssueState, params, service::middleware::retry::RetryConfig};
use tracing::{debug, instrument};

use crate::base::{
    config::Config,
    types::{RepoId, Res, Void},
};

use super::{GenericGithubClient, GithubClient};

// Extra methods on `GithubClient` applied by the octocrab implementation.

impl GithubClient {
    /// Creates a GitHub client authenticated with the configured token.
    pub fn octocrab(config: &Config) -> Res<Self> {
        let client = OctocrabGithubClient::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Specific implementations.

/// Octocrab GitHub client implementation.
#[derive(Clone)]
pub struct OctocrabGithubClient {
    client: Octocrab,
}

impl OctocrabGithubClient {
    /// Create a new octocrab client.
    ///
    /// Fails before any request is made when no token is configured. Requests are sent
    /// once; a failed call is never re-sent.
    #[instrument(name = "OctocrabGithubClient::new", skip_all)]
    pub fn new(config: &Config) -> Res<Self> {
        let token = config.token()?.to_string();

        let mut builder = Octocrab::builder().personal_token(token).add_retry_config(RetryConfig::None);

        if let Some(api_url) = config.api_url() {
            debug!("Using GitHub API at {api_url}");
            builder = builder.base_uri(api_url)?;
        }

        Ok(Self { client: builder.build()? })
    }
}

#[async_trait]
impl GenericGithubClient for OctocrabGithubClient {
    #[instrument(name = "OctocrabGithubClient::search_issues_total_count", skip(self))]
    async fn search_issues_total_count(&self, query: &str) -> Res<u64> {
        let page = self.client.search().issues_and_pull_requests(query).per_page(1u8).send().await?;

        Ok(page.total_count.unwrap_or(0))
    }

    #[instrument(name = "OctocrabGithubClient::close_issue", skip(self))]
    async fn close_issue(&self, repo: &RepoId, number: u64) -> Void {
        self.client.issues(&repo.owner, &repo.name).update(number).state(IssueState::Closed).send().await?;

        Ok(())
    }

    #[instrument(name = "OctocrabGithubClient::close_pull_request", skip(self))]
    async fn close_pull_request(&self, repo: &RepoId, number: u64) -> Void {
        self.client
            .pulls(&repo.owner, &repo.name)
            .update(number)
            .state(params::pulls::State::Closed)
            .send()
            .await?;

        Ok(())
    }

    #[instrument(name = "OctocrabGithubClient::add_labels", skip(self))]
    async fn add_labels(&self, repo: &RepoId, number: u64, labels: &[String]) -> Void {
        self.client.issues(&repo.owner, &repo.name).add_labels(number, labels).await?;

        Ok(())
    }

    #[instrument(name = "OctocrabGithubClient::add_assignees", skip(self))]
    async fn add_assignees(&self, repo: &RepoId, number: u64, assignees: &[String]) -> Void {
        let assignees: Vec<&str> = assignees.iter().map(String::as_str).collect();

        self.client.issues(&repo.owner, &repo.name).add_assignees(number, &assignees).await?;

        Ok(())
    }

    #[instrument(name = "OctocrabGithubClient::create_comment", skip(self, body))]
    async fn create_comment(&self, repo: &RepoId, number: u64, body: &str) -> Void {
        self.client.issues(&repo.owner, &repo.name).create_comment(number, body).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{BufRead, BufReader, Read, Write},
        net::TcpListener,
        sync::atomic::{AtomicUsize, Ordering},
        thread,
    };

    use super::*;

    /// Serves `502 Bad Gateway` to every request and counts the requests seen.
    fn spawn_bad_gateway() -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let mut reader = BufReader::new(stream.try_clone().unwrap());

                let mut content_length = 0usize;
                let mut line = String::new();
                loop {
                    line.clear();
                    if reader.read_line(&mut line).unwrap_or(0) == 0 {
                        break;
                    }
                    if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                        content_length = value.trim().parse().unwrap_or(0);
                    }
                    if line == "\r\n" {
                        break;
                    }
                }
                let mut body = vec![0; content_length];
                let _ = reader.read_exact(&mut body);

                counter.fetch_add(1, Ordering::SeqCst);
                let _ = stream.write_all(b"HTTP/1.1 502 Bad Gateway\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
            }
        });

        (format!("http://{addr}"), seen)
    }

    #[tokio::test]
    async fn failed_comment_is_sent_once() {
        let (api_url, seen) = spawn_bad_gateway();
        let config = Config::load_from(
            vec![
                ("GITHUB_TOKEN".to_string(), "t0ken".to_string()),
                ("GITHUB_API_URL".to_string(), api_url),
            ],
            None,
        )
        .unwrap();
        let github = GithubClient::octocrab(&config).unwrap();
        let repo = RepoId::new("octo", "hello");

        let result = github.create_comment(&repo, 7, "Welcome!").await;

        assert!(result.is_err());
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
