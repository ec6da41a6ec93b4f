//! CLI runner - executes commands

use crate::cli::commands::{
    Cli, Commands, GzipCommands, OutputFormat, ServiceAuthorizationCommands, WafCommands,
};
use crate::client::Client;
use crate::config::{ClientConfig, API_KEY_ENV_VAR};
use crate::error::Result;
use crate::resources::{
    GetServiceAuthorizationInput, GetWafRuleStatusesInput, ListGzipsInput,
    ListServiceAuthorizationsInput, ListWafsInput, WafRuleStatusFilters,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = Client::new(self.load_config()?)?;

        let output = match &self.cli.command {
            Commands::ServiceAuthorizations(cmd) => {
                self.service_authorizations(&client, cmd).await?
            }
            Commands::Wafs(WafCommands::List { service, version }) => {
                let wafs = client
                    .list_wafs(&ListWafsInput {
                        service_id: service.clone(),
                        service_version: *version,
                    })
                    .await?;
                to_value(&wafs)?
            }
            Commands::WafRuleStatuses {
                service,
                waf,
                status,
            } => {
                let response = client
                    .get_waf_rule_statuses(&GetWafRuleStatusesInput {
                        service_id: service.clone(),
                        waf_id: waf.clone(),
                        filters: WafRuleStatusFilters {
                            status: status.clone().unwrap_or_default(),
                            ..Default::default()
                        },
                    })
                    .await?;
                info!(count = response.rules.len(), "Fetched rule statuses");
                to_value(&response.rules)?
            }
            Commands::Gzips(GzipCommands::List { service, version }) => {
                let gzips = client
                    .list_gzips(&ListGzipsInput {
                        service_id: service.clone(),
                        service_version: *version,
                    })
                    .await?;
                to_value(&gzips)?
            }
        };

        self.output(&output);
        Ok(())
    }

    /// Load the client configuration
    ///
    /// A config file without `api_key` falls back to the environment.
    fn load_config(&self) -> Result<ClientConfig> {
        let Some(path) = &self.cli.config else {
            return ClientConfig::from_env();
        };

        debug!(path = %path.display(), "Loading client config");
        let mut config = ClientConfig::from_file(path)?;
        if config.api_key.is_none() {
            config.api_key = std::env::var(API_KEY_ENV_VAR)
                .ok()
                .filter(|k| !k.trim().is_empty());
        }
        Ok(config)
    }

    async fn service_authorizations(
        &self,
        client: &Client,
        cmd: &ServiceAuthorizationCommands,
    ) -> Result<Value> {
        match cmd {
            ServiceAuthorizationCommands::List {
                per_page,
                page,
                all,
            } => {
                let input = ListServiceAuthorizationsInput {
                    per_page: *per_page,
                    page: *page,
                };

                let items = if *all {
                    let mut paginator = client.new_list_service_authorizations_paginator(&input);
                    let items = paginator.collect_all().await?;
                    info!(
                        count = items.len(),
                        pages = paginator.current_page(),
                        "Fetched service authorizations"
                    );
                    items
                } else {
                    client.list_service_authorizations(&input).await?
                };
                to_value(&items)
            }
            ServiceAuthorizationCommands::Get { id } => {
                let sa = client
                    .get_service_authorization(&GetServiceAuthorizationInput { id: id.clone() })
                    .await?;
                to_value(&sa)
            }
        }
    }

    /// Print a result to stdout
    fn output(&self, value: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(value).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
            }
        }
    }
}

fn to_value<T: Serialize>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}
