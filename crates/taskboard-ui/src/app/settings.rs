use taskboard_core::ClientConfig;

/// Builds the client config from
/// variables baked in at compile time.
/// An invalid value falls back to the
/// defaults rather than breaking the
/// page.
pub fn load_client_config() -> ClientConfig {
  let overrides = [
    (
      "api_base",
      option_env!("TASKBOARD_API_URL")
    ),
    (
      "default_status_on_create",
      option_env!(
        "TASKBOARD_DEFAULT_STATUS"
      )
    ),
    (
      "sync_policy",
      option_env!("TASKBOARD_SYNC_POLICY")
    ),
    (
      "notice_dismiss_ms",
      option_env!("TASKBOARD_NOTICE_MS")
    )
  ]
  .into_iter()
  .filter_map(|(key, value)| {
    value.map(|value| {
      (key.to_string(), value.to_string())
    })
  });

  let mut cfg = ClientConfig::default();
  if let Err(err) =
    cfg.apply_overrides(overrides)
  {
    tracing::warn!(
      error = %err,
      "ignoring invalid build-time \
       config"
    );
    return ClientConfig::default();
  }

  tracing::info!(
    api_base = %cfg.api_base,
    sync_policy = %cfg.sync_policy,
    default_status = cfg.default_status_on_create,
    "client config loaded"
  );
  cfg
}
