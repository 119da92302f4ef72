//! AWS SDK configuration for the Bedrock client and the `config check`
//! credential check.

use crate::config::{CredentialSource, Settings};

/// Who the resolved credentials belong to.
#[derive(Debug, Clone)]
pub struct CallerIdentity {
    pub account_id: String,
    pub arn: String,
}

/// Build an `SdkConfig` for the effective settings.
///
/// Inline keys are installed as a static provider; a named profile is
/// passed through to the SDK's profile loader; otherwise the default
/// provider chain applies.
pub async fn sdk_config(settings: &Settings) -> aws_config::SdkConfig {
    let loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(settings.region.clone()));

    let loader = match &settings.credentials {
        CredentialSource::Inline {
            access_key_id,
            secret_access_key,
            session_token,
        } => loader.credentials_provider(aws_sdk_sts::config::Credentials::new(
            access_key_id,
            secret_access_key,
            session_token.clone(),
            None,
            "alibi-config",
        )),
        CredentialSource::Profile { profile_name } => loader.profile_name(profile_name),
        CredentialSource::DefaultChain => loader,
    };

    loader.load().await
}

/// Resolve the caller via STS `GetCallerIdentity`. Fails if the
/// credentials are missing or rejected.
pub async fn caller_identity(config: &aws_config::SdkConfig) -> eyre::Result<CallerIdentity> {
    let response = aws_sdk_sts::Client::new(config)
        .get_caller_identity()
        .send()
        .await
        .map_err(|e| eyre::eyre!("credential check failed: {}", e.into_service_error()))?;

    Ok(CallerIdentity {
        account_id: response.account().unwrap_or_default().to_string(),
        arn: response.arn().unwrap_or_default().to_string(),
    })
}
