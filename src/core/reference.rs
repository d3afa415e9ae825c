//! Parameter value resolution for directly exposed credentials.
//!
//! When credentials are exposed (`expose: true`), the parameter's value is
//! baked into the function environment. How that value is obtained is
//! pluggable:
//!
//! - **dynamic** (default): emit a CloudFormation dynamic reference, so the
//!   provisioning engine resolves it at deploy time.
//! - **aws**: feature-gated (`aws`). Fetch the value now with the AWS SDK.

use tracing::trace;

use crate::core::credentials::Provider;
use crate::error::Result;

/// Produces the value stored for an exposed parameter.
pub trait ParameterResolver {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Resolve the value of `parameter` held by `provider`.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Lookup` if the value cannot be obtained.
    fn resolve(&self, provider: Provider, parameter: &str) -> Result<String>;
}

/// Resolves parameters to CloudFormation dynamic references.
#[derive(Debug, Default, Clone, Copy)]
pub struct DynamicReference;

impl ParameterResolver for DynamicReference {
    fn name(&self) -> &'static str {
        "dynamic"
    }

    fn resolve(&self, provider: Provider, parameter: &str) -> Result<String> {
        let service = match provider {
            Provider::Ssm => "ssm",
            Provider::Secret => "secretsmanager",
        };
        trace!(service, "building dynamic reference");
        Ok(format!("{{{{resolve:{}:{}}}}}", service, parameter))
    }
}

/// Selectable resolver backends.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lookup {
    /// CloudFormation dynamic reference, resolved at deploy time
    #[default]
    Dynamic,
    /// Live lookup through the AWS SDK (requires the `aws` feature)
    Aws,
}

impl Lookup {
    /// Instantiate the resolver for this backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend was not compiled in.
    pub fn resolver(self) -> Result<Box<dyn ParameterResolver>> {
        match self {
            Self::Dynamic => Ok(Box::new(DynamicReference)),
            #[cfg(feature = "aws")]
            Self::Aws => Ok(Box::new(aws::AwsLookup::new())),
            #[cfg(not(feature = "aws"))]
            Self::Aws => Err(crate::error::Error::Other(
                "aws lookup requires building with --features aws".to_string(),
            )),
        }
    }
}

#[cfg(feature = "aws")]
pub mod aws {
    //! Live lookups against SSM Parameter Store and Secrets Manager.
    //!
    //! Uses AWS credentials from the environment (AWS_ACCESS_KEY_ID, etc.)
    //! or from the default credential provider chain.

    use tracing::trace;

    use super::ParameterResolver;
    use crate::core::credentials::Provider;
    use crate::error::{CredentialError, Result};

    /// AWS SDK backed resolver.
    #[derive(Debug, Default)]
    pub struct AwsLookup {
        decrypt: bool,
    }

    impl AwsLookup {
        /// Resolver that reads SecureString parameters decrypted.
        pub fn new() -> Self {
            Self { decrypt: true }
        }
    }

    fn lookup_error(name: &str, reason: impl std::fmt::Display) -> CredentialError {
        CredentialError::Lookup {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    impl ParameterResolver for AwsLookup {
        fn name(&self) -> &'static str {
            "aws"
        }

        fn resolve(&self, provider: Provider, parameter: &str) -> Result<String> {
            trace!(?provider, "looking up parameter with AWS SDK");

            // The SDK is async; drive it on a private runtime.
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| lookup_error(parameter, format!("failed to create runtime: {}", e)))?;

            rt.block_on(async {
                let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

                let value = match provider {
                    Provider::Ssm => {
                        let client = aws_sdk_ssm::Client::new(&config);
                        let output = client
                            .get_parameter()
                            .name(parameter)
                            .with_decryption(self.decrypt)
                            .send()
                            .await
                            .map_err(|e| lookup_error(parameter, format!("SSM GetParameter failed: {}", e)))?;
                        output
                            .parameter()
                            .and_then(|p| p.value())
                            .map(str::to_string)
                    }
                    Provider::Secret => {
                        let client = aws_sdk_secretsmanager::Client::new(&config);
                        let output = client
                            .get_secret_value()
                            .secret_id(parameter)
                            .send()
                            .await
                            .map_err(|e| {
                                lookup_error(parameter, format!("GetSecretValue failed: {}", e))
                            })?;
                        output.secret_string().map(str::to_string)
                    }
                };

                let value = value
                    .filter(|v| !v.is_empty())
                    .ok_or_else(|| lookup_error(parameter, "empty or does not exist"))?;
                trace!(value_len = value.len(), "parameter resolved");
                Ok::<_, crate::error::Error>(value)
            })
        }
    }
}
