use async_trait::async_trait;
use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, AUTHORIZATION},
};

use crate::config::AppConfig;
use crate::domain::issue::{CreatedIssue, IssueCreateRequest, TrackerIssue};
use crate::error::{AppError, AppResult};
use crate::infra::http::{build_client, decode_json, expect_status};
use crate::services::IssueTrackerService;

const SERVICE: &str = "GitHub";
const PAGE_SIZE: usize = 100;
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

pub struct GithubClient {
    http: Client,
    api_url: String,
    repository: String,
    token: String,
}

impl GithubClient {
    pub fn new(http: Client, api_url: String, repository: String, token: String) -> Self {
        Self {
            http,
            api_url,
            repository,
            token,
        }
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Ok(Self::new(
            build_client(config.http_timeout)?,
            config.github_api_url.clone(),
            config.repository.clone(),
            config.github_token.clone(),
        ))
    }

    fn auth_header(token: &str) -> String {
        format!("Bearer {token}")
    }

    fn issues_endpoint(&self) -> String {
        format!(
            "{}/repos/{}/issues",
            self.api_url.trim_end_matches('/'),
            self.repository
        )
    }
}

#[async_trait]
impl IssueTrackerService for GithubClient {
    async fn list_issues(&self, page: u32) -> AppResult<Vec<TrackerIssue>> {
        let response = self
            .http
            .get(self.issues_endpoint())
            .query(&[
                ("state", "all".to_string()),
                ("per_page", PAGE_SIZE.to_string()),
                ("page", page.to_string()),
            ])
            .header(AUTHORIZATION, Self::auth_header(&self.token))
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .send()
            .await
            .map_err(|source| AppError::Transport {
                service: SERVICE,
                source,
            })?;

        let response = expect_status(SERVICE, response, StatusCode::OK).await?;
        decode_json(SERVICE, response).await
    }

    async fn create_issue(&self, request: &IssueCreateRequest) -> AppResult<CreatedIssue> {
        let response = self
            .http
            .post(self.issues_endpoint())
            .header(AUTHORIZATION, Self::auth_header(&self.token))
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .json(request)
            .send()
            .await
            .map_err(|source| AppError::Transport {
                service: SERVICE,
                source,
            })?;

        let response = expect_status(SERVICE, response, StatusCode::CREATED).await?;
        decode_json(SERVICE, response).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer) -> GithubClient {
        GithubClient::new(
            build_client(Duration::from_secs(5)).unwrap(),
            server.uri(),
            "acme/helpdesk".to_string(),
            "gh-token".to_string(),
        )
    }

    #[tokio::test]
    async fn lists_issues_across_all_states() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/helpdesk/issues"))
            .and(query_param("state", "all"))
            .and(query_param("per_page", "100"))
            .and(query_param("page", "2"))
            .and(header("authorization", "Bearer gh-token"))
            .and(header("accept", GITHUB_MEDIA_TYPE))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"number": 5, "title": "[Fresh Service] [#42] VPN down", "state": "closed"},
                {"number": 6, "title": "Unrelated", "state": "open", "pull_request": {}}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let issues = client(&server).list_issues(2).await.unwrap();

        let titles: Vec<_> = issues.iter().map(|issue| issue.title.as_str()).collect();
        assert_eq!(titles, vec!["[Fresh Service] [#42] VPN down", "Unrelated"]);
    }

    #[tokio::test]
    async fn maps_listing_failure_to_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Bad credentials"))
            .mount(&server)
            .await;

        let err = client(&server).list_issues(1).await.unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert!(err.to_string().contains("Bad credentials"));
    }

    #[tokio::test]
    async fn creates_issue_with_title_and_body_only() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/repos/acme/helpdesk/issues"))
            .and(header("authorization", "Bearer gh-token"))
            .and(body_json(serde_json::json!({
                "title": "[Fresh Service] [#42] VPN down",
                "body": "details"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "number": 12,
                "html_url": "https://github.com/acme/helpdesk/issues/12",
                "title": "[Fresh Service] [#42] VPN down"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = IssueCreateRequest {
            ticket_id: 42,
            title: "[Fresh Service] [#42] VPN down".to_string(),
            body: "details".to_string(),
        };
        let created = client(&server).create_issue(&request).await.unwrap();

        assert_eq!(created.number, 12);
        assert_eq!(
            created.html_url,
            "https://github.com/acme/helpdesk/issues/12"
        );
    }

    #[tokio::test]
    async fn treats_non_201_creation_as_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "number": 1,
                "html_url": "https://example.invalid"
            })))
            .mount(&server)
            .await;

        let request = IssueCreateRequest {
            ticket_id: 1,
            title: "t".to_string(),
            body: "b".to_string(),
        };
        let err = client(&server).create_issue(&request).await.unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn leaves_request_validation_to_github() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(serde_json::json!({"title": "", "body": "b"})))
            .respond_with(ResponseTemplate::new(422).set_body_string("Validation Failed"))
            .expect(1)
            .mount(&server)
            .await;

        let request = IssueCreateRequest {
            ticket_id: 1,
            title: String::new(),
            body: "b".to_string(),
        };
        let err = client(&server).create_issue(&request).await.unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
    }

    #[tokio::test]
    async fn reports_transport_failures() {
        let github = GithubClient::new(
            build_client(Duration::from_secs(1)).unwrap(),
            "http://127.0.0.1:1".to_string(),
            "acme/helpdesk".to_string(),
            "gh-token".to_string(),
        );

        let err = github.list_issues(1).await.unwrap_err();

        assert!(matches!(err, AppError::Transport { .. }));
    }
}
