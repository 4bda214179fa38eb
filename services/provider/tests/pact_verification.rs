//! Replays the committed consumer pact against the real router served on an
//! ephemeral port.

use std::net::SocketAddr;
use std::time::Duration;

use date_provider::config::{Config, DataBackend, NotFoundSwitch};
use date_provider::http::{AppState, router};
use date_provider::presence::DataPresence;
use date_provider::shutdown::run_with_graceful_shutdown;
use pact_contract::{Mismatch, PactBuilder, ProviderVerifier};
use test_utils::fixtures::{CONSUMER_NAME, PROVIDER_NAME, committed_contract};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct RunningProvider {
    addr: SocketAddr,
    state: AppState,
    stop: oneshot::Sender<()>,
    handle: JoinHandle<std::io::Result<()>>,
}

impl RunningProvider {
    async fn start(config: Config) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = AppState::from_config(&config);
        let app = router(state.clone(), config.provider_states_enabled);
        let (stop, stopped) = oneshot::channel::<()>();

        let handle = tokio::spawn(run_with_graceful_shutdown(
            listener,
            app,
            async move {
                let _ = stopped.await;
            },
            Duration::from_secs(5),
        ));

        Self {
            addr,
            state,
            stop,
            handle,
        }
    }

    fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn verifier(&self) -> ProviderVerifier {
        ProviderVerifier::new(PROVIDER_NAME, &self.base_url())
            .unwrap()
            .with_state_change_url(&format!("{}/provider-states", self.base_url()))
            .unwrap()
    }

    async fn stop(self) {
        let _ = self.stop.send(());
        self.handle.await.unwrap().unwrap();
    }
}

fn memory_config() -> Config {
    Config {
        data_backend: DataBackend::Memory,
        not_found_switch: NotFoundSwitch::Fixed(false),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_committed_pact_verifies() {
    let provider = RunningProvider::start(memory_config()).await;
    let contract = committed_contract().unwrap();
    assert_eq!(contract.consumer.name, CONSUMER_NAME);
    assert_eq!(contract.interactions.len(), 4);

    let result = provider.verifier().verify(&contract).await.unwrap();
    assert!(result.success, "{}", result.summary());
    assert_eq!(result.interactions.len(), 4);

    provider.stop().await;
}

#[tokio::test]
async fn test_committed_pact_verifies_against_sentinel_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        data_backend: DataBackend::File,
        data_file: dir.path().join("data").join("somedata.txt"),
        ..memory_config()
    };
    let provider = RunningProvider::start(config).await;

    let result = provider
        .verifier()
        .verify(&committed_contract().unwrap())
        .await
        .unwrap();
    assert!(result.success, "{}", result.summary());

    provider.stop().await;
}

#[tokio::test]
async fn test_forced_not_found_breaks_verification() {
    let config = Config {
        not_found_switch: NotFoundSwitch::Fixed(true),
        ..memory_config()
    };
    let provider = RunningProvider::start(config).await;

    let result = provider
        .verifier()
        .verify(&committed_contract().unwrap())
        .await
        .unwrap();
    assert!(!result.success);
    assert!(result.failures().any(|r| r
        .mismatches
        .iter()
        .any(|m| matches!(m, Mismatch::Status { expected: 200, actual: 404 }))));

    provider.stop().await;
}

#[tokio::test]
async fn test_unknown_state_fails_setup() {
    let provider = RunningProvider::start(memory_config()).await;

    let mut pact = PactBuilder::new(CONSUMER_NAME, PROVIDER_NAME);
    pact.add(
        PactBuilder::upon_receiving("A request needing an unsupported state")
            .given("There is cake")
            .with_request("GET", "/api/provider")
            .with_query("validDateTime", "04/05/2018")
            .will_respond_with(200)
            .build(),
    );

    let result = provider.verifier().verify(&pact.build()).await.unwrap();
    assert!(!result.success);
    let failure = result.failures().next().unwrap();
    assert!(matches!(
        failure.mismatches.first(),
        Some(Mismatch::StateChange { status: 500, .. })
    ));

    // the provider survived the failed setup
    assert!(!provider.state.presence.exists());
    provider.stop().await;
}
