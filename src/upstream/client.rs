use super::cache::ResponseCache;
use super::normalize_identifier;
use super::records::{
    EggGroupRecord, EvolutionChainRecord, LocationAreaEncounter, MoveRecord, PokemonListPage,
    PokemonRecord, SpeciesRecord,
};
use super::DexSource;
use crate::config::DexConfig;
use crate::errors::{DexError, DexResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// PokeAPI over HTTP with a shared response cache.
///
/// Bodies are cached by request path, so the same record fetched through two
/// different calls (e.g. detail and weaknesses) costs one request.
#[derive(Debug)]
pub struct PokeApiClient {
    http: Client,
    base_url: String,
    cache: ResponseCache,
}

impl PokeApiClient {
    pub fn new(config: &DexConfig) -> DexResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("frlg-dex/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cache: ResponseCache::new(
                config.cache_capacity,
                Duration::from_secs(config.cache_ttl_secs),
            ),
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        identifier: &str,
        path: String,
    ) -> DexResult<T> {
        let body = match self.cache.get(&path).await {
            Some(body) => {
                debug!(%path, "cache hit");
                body
            }
            None => {
                debug!(%path, "cache miss, fetching");
                let body = self.fetch(resource, identifier, &path).await?;
                self.cache.put(path.clone(), Arc::clone(&body)).await;
                let cached = self.cache.len().await;
                debug!(%path, cached, "response cached");
                body
            }
        };
        serde_json::from_str(&body).map_err(|e| {
            warn!(%path, error = %e, "undecodable upstream body");
            DexError::UpstreamUnavailable(format!("malformed response for {}: {}", path, e))
        })
    }

    async fn fetch(
        &self,
        resource: &'static str,
        identifier: &str,
        path: &str,
    ) -> DexResult<Arc<str>> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(DexError::not_found(resource, identifier)),
            status if !status.is_success() => {
                warn!(%url, %status, "upstream request failed");
                Err(DexError::UpstreamUnavailable(format!(
                    "HTTP {} for {}",
                    status, path
                )))
            }
            _ => Ok(Arc::from(response.text().await?)),
        }
    }
}

#[async_trait]
impl DexSource for PokeApiClient {
    async fn pokemon(&self, id: &str) -> DexResult<PokemonRecord> {
        let id = normalize_identifier(id)?;
        self.get("Pokemon", &id, format!("/pokemon/{}", id)).await
    }

    async fn species(&self, id: &str) -> DexResult<SpeciesRecord> {
        let id = normalize_identifier(id)?;
        self.get("Species", &id, format!("/pokemon-species/{}", id))
            .await
    }

    async fn move_record(&self, id: &str) -> DexResult<MoveRecord> {
        let id = normalize_identifier(id)?;
        self.get("Move", &id, format!("/move/{}", id)).await
    }

    async fn egg_group(&self, name: &str) -> DexResult<EggGroupRecord> {
        let name = normalize_identifier(name)?;
        self.get("Egg group", &name, format!("/egg-group/{}", name))
            .await
    }

    async fn pokemon_list(&self, limit: u32, offset: u32) -> DexResult<PokemonListPage> {
        let path = format!("/pokemon?limit={}&offset={}", limit, offset);
        self.get("Pokemon list", &path, path.clone()).await
    }

    async fn evolution_chain(&self, chain_id: u32) -> DexResult<EvolutionChainRecord> {
        let id = chain_id.to_string();
        self.get("Evolution chain", &id, format!("/evolution-chain/{}", id))
            .await
    }

    async fn encounters(&self, id: &str) -> DexResult<Vec<LocationAreaEncounter>> {
        let id = normalize_identifier(id)?;
        self.get("Encounters", &id, format!("/pokemon/{}/encounters", id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> PokeApiClient {
        let config = DexConfig {
            base_url: server.uri(),
            timeout_secs: 1,
            ..DexConfig::default()
        };
        PokeApiClient::new(&config).unwrap()
    }

    fn pikachu() -> serde_json::Value {
        json!({
            "id": 25,
            "name": "pikachu",
            "types": [{"slot": 1, "type": {"name": "electric", "url": ""}}],
            "sprites": {"front_default": "https://img/25.png"}
        })
    }

    #[tokio::test]
    async fn fetches_and_decodes_a_pokemon() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pokemon/pikachu"))
            .respond_with(ResponseTemplate::new(200).set_body_json(pikachu()))
            .mount(&server)
            .await;

        let record = client_for(&server).pokemon("Pikachu").await.unwrap();
        assert_eq!(record.id, 25);
        assert_eq!(record.types[0].type_.name, "electric");
    }

    #[tokio::test]
    async fn repeated_lookups_hit_the_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pokemon/25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(pikachu()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.pokemon("25").await.unwrap();
        client.pokemon("25").await.unwrap();
        assert_eq!(client.cache.len().await, 1);
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/move/not-a-move"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        let err = client_for(&server).move_record("not-a-move").await.unwrap_err();
        assert_eq!(err, DexError::not_found("Move", "not-a-move"));
    }

    #[tokio::test]
    async fn server_errors_are_upstream_unavailable_and_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pokemon-species/1"))
            .respond_with(ResponseTemplate::new(503))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server);
        for _ in 0..2 {
            let err = client.species("1").await.unwrap_err();
            assert!(err.is_retryable(), "{:?}", err);
        }
        assert_eq!(client.cache.len().await, 0);
    }

    #[tokio::test]
    async fn slow_responses_time_out_as_upstream_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pokemon/slowpoke"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(pikachu())
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).pokemon("slowpoke").await.unwrap_err();
        assert!(matches!(err, DexError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn malformed_body_is_upstream_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/egg-group/monster"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).egg_group("monster").await.unwrap_err();
        assert!(matches!(err, DexError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn list_passes_limit_and_offset() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pokemon"))
            .and(query_param("limit", "3"))
            .and(query_param("offset", "150"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 1302,
                "results": [{"name": "mewtwo", "url": "https://pokeapi.co/api/v2/pokemon/150/"}]
            })))
            .mount(&server)
            .await;

        let page = client_for(&server).pokemon_list(3, 150).await.unwrap();
        assert_eq!(page.count, 1302);
        assert_eq!(page.results[0].id(), Some(150));
    }

    #[tokio::test]
    async fn invalid_identifier_never_reaches_the_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server).pokemon("../type/1").await.unwrap_err();
        assert_eq!(
            err,
            DexError::Validation(ValidationError::InvalidIdentifier("../type/1".to_string()))
        );
    }
}
