//! Mock-based client tests using wiremock.
//!
//! These tests verify the search/fetch pipeline against a mocked E-utilities server.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pubmed_affiliations::client::PubMedClient;
use pubmed_affiliations::config::Config;
use pubmed_affiliations::error::FetchError;

const ESEARCH_XML: &str = include_str!("fixtures/esearch.xml");
const EFETCH_XML: &str = include_str!("fixtures/efetch.xml");

fn setup_client(mock_server: &MockServer) -> PubMedClient {
    let config = Config::for_testing(&mock_server.uri());
    PubMedClient::new(config).unwrap()
}

fn xml_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/xml")
}

// =============================================================================
// End-to-end Scenario
// =============================================================================

#[tokio::test]
async fn test_search_scenario_cancer_treatment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("db", "pubmed"))
        .and(query_param("term", "cancer treatment"))
        .and(query_param("retmax", "100"))
        .respond_with(xml_response(ESEARCH_XML))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("db", "pubmed"))
        .and(query_param("id", "111,222"))
        .and(query_param("retmode", "xml"))
        .respond_with(xml_response(EFETCH_XML))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let papers = client.search("cancer treatment").await.unwrap();

    assert_eq!(papers.len(), 2);

    let industry = &papers[0];
    assert_eq!(industry.pubmed_id(), "111");
    assert_eq!(industry.title(), "Novel kinase inhibitors in cancer treatment.");
    assert_eq!(industry.publication_date(), "2023");
    assert_eq!(industry.non_academic_authors(), &["Alice Smith".to_string()]);
    assert_eq!(
        industry.company_affiliations(),
        &["XYZ Pharmaceuticals, contact: a@xyz.com".to_string()]
    );
    assert_eq!(industry.corresponding_author_email(), Some("a@xyz.com"));

    let academic = &papers[1];
    assert_eq!(academic.pubmed_id(), "222");
    assert_eq!(academic.publication_date(), "2021");
    assert!(!academic.has_non_academic_authors());
    assert!(academic.company_affiliations().is_empty());
    assert!(academic.corresponding_author_email().is_none());
}

#[tokio::test]
async fn test_fetch_ids_document_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(xml_response(
            "<eSearchResult><IdList><Id>30</Id><Id>10</Id><Id>20</Id></IdList></eSearchResult>",
        ))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let ids = client.fetch_ids("aspirin").await.unwrap();
    assert_eq!(ids, vec!["30", "10", "20"]);
}

#[tokio::test]
async fn test_fetch_ids_custom_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("retmax", "5"))
        .respond_with(xml_response("<eSearchResult><IdList/></eSearchResult>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    assert!(client.fetch_ids_with_limit("aspirin", 5).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_fetch_ids_largest_limit_accepted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("retmax", "100"))
        .respond_with(xml_response("<eSearchResult><IdList><Id>1</Id></IdList></eSearchResult>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    assert_eq!(client.fetch_ids_with_limit("aspirin", 100).await.unwrap(), vec!["1"]);
    assert!(matches!(
        client.fetch_ids_with_limit("aspirin", 101).await,
        Err(FetchError::InvalidInput { .. })
    ));
}

#[tokio::test]
async fn test_blank_query_sent_to_remote() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("term", ""))
        .respond_with(xml_response("<eSearchResult><Count>0</Count><IdList/></eSearchResult>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    assert!(client.search("").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_configured_max_results_used() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("retmax", "7"))
        .respond_with(xml_response("<eSearchResult><IdList/></eSearchResult>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = Config::for_testing(&mock_server.uri()).with_max_results(7);
    let client = PubMedClient::new(config).unwrap();
    assert_eq!(client.max_results(), 7);
    client.fetch_ids("aspirin").await.unwrap();
}

#[tokio::test]
async fn test_identity_params_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("api_key", "secret-key"))
        .and(query_param("email", "me@example.org"))
        .and(query_param("tool", "pubmed-affiliations"))
        .respond_with(xml_response("<eSearchResult><IdList/></eSearchResult>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = Config::for_testing(&mock_server.uri());
    config.api_key = Some("secret-key".to_string());
    config.email = Some("me@example.org".to_string());
    let client = PubMedClient::new(config).unwrap();

    client.fetch_ids("aspirin").await.unwrap();
}

// =============================================================================
// Empty Inputs
// =============================================================================

#[tokio::test]
async fn test_fetch_details_empty_ids_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let papers = client.fetch_details(&[]).await.unwrap();
    assert!(papers.is_empty());
}

#[tokio::test]
async fn test_search_with_no_hits_skips_efetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(xml_response("<eSearchResult><Count>0</Count><IdList/></eSearchResult>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(xml_response(EFETCH_XML))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    assert!(client.search("zzzz no such topic").await.unwrap().is_empty());
}

// =============================================================================
// Error Handling
// =============================================================================

#[tokio::test]
async fn test_esearch_server_error_is_remote_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let err = client.fetch_ids("cancer").await.unwrap_err();

    assert!(err.is_remote());
    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("Internal Server Error"));
}

#[tokio::test]
async fn test_efetch_rate_limited_is_remote_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(429).set_body_string("API rate limit exceeded"))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let err = client.fetch_details(&["1".to_string()]).await.unwrap_err();
    assert_eq!(err.status(), Some(429));
}

#[tokio::test]
async fn test_failed_call_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    assert_eq!(client.fetch_ids("cancer").await.unwrap_err().status(), Some(503));
    assert_eq!(client.fetch_details(&["1".to_string()]).await.unwrap_err().status(), Some(503));
}

#[tokio::test]
async fn test_malformed_esearch_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(xml_response("<eSearchResult><IdList><Id>1</Id>"))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let err = client.fetch_ids("cancer").await.unwrap_err();
    assert!(matches!(err, FetchError::Parse(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_malformed_efetch_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(xml_response("<PubmedArticleSet><PubmedArticle></PubmedArticleSet>"))
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let err = client.fetch_details(&["1".to_string()]).await.unwrap_err();
    assert!(err.is_parse(), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_search_stops_after_failed_esearch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Invalid query"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(xml_response(EFETCH_XML))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let err = client.search("cancer").await.unwrap_err();
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let config = Config::for_testing("http://127.0.0.1:1");
    let client = PubMedClient::new(config).unwrap();

    let err = client.fetch_ids("cancer").await.unwrap_err();
    assert!(matches!(err, FetchError::Http(_)), "unexpected: {err:?}");
}
