//! [`Http`] payment gateway implementation.

use derive_more::{Display, Error as StdError, From};
use secrecy::{ExposeSecret as _, SecretString};
use serde::Deserialize;
use smart_default::SmartDefault;
use tracerr::Traced;

use super::{CreateIntent, Intent, Payments};

/// Payment gateway reached over an HTTPS JSON endpoint (a serverless
/// function in front of the hosted payment processor).
#[derive(Clone, Debug)]
pub struct Http {
    /// HTTP client executing the requests.
    client: reqwest::Client,

    /// Configuration of this gateway.
    config: Config,
}

impl Http {
    /// Creates a new [`Http`] gateway with the provided [`Config`].
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

/// [`Http`] gateway configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Config {
    /// URL of the payment intent endpoint.
    #[default("https://localhost:5001/payments/intent".to_owned())]
    pub endpoint: String,

    /// Bearer token authorizing calls to the endpoint, if it requires one.
    pub secret: Option<SecretString>,
}

impl Payments<CreateIntent> for Http {
    type Ok = Intent;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        intent: CreateIntent,
    ) -> Result<Self::Ok, Self::Err> {
        let mut request = self
            .client
            .post(&self.config.endpoint)
            .json(&intent);
        if let Some(secret) = &self.config.secret {
            request = request.bearer_auth(secret.expose_secret());
        }

        let response = request
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(tracerr::from_and_wrap!(=> Error))?;

        tracing::debug!(
            customer = %intent.customer_id,
            amount = intent.amount,
            "payment intent provisioned",
        );

        response
            .json::<Intent>()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
    }
}

/// Error of an [`Http`] gateway request execution.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Request failed in transport, or the endpoint answered with an error
    /// status or a malformed body.
    #[display("payment endpoint request failed: {_0}")]
    Request(reqwest::Error),
}
