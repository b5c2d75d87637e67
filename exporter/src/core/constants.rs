// =============================================================================
// Application Identity
// =============================================================================

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "cwsink";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".cwsink";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "cwsink.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "CWSINK_CONFIG";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "CWSINK_LOG";

// =============================================================================
// Environment Variables - Output
// =============================================================================

/// Environment variable for the target namespace
pub const ENV_NAMESPACE: &str = "CWSINK_NAMESPACE";

/// Environment variable enabling one-second storage resolution
pub const ENV_HIGH_RESOLUTION_METRICS: &str = "CWSINK_HIGH_RESOLUTION_METRICS";

/// Environment variable enabling statistic-set aggregation
pub const ENV_WRITE_STATISTICS: &str = "CWSINK_WRITE_STATISTICS";

// =============================================================================
// Environment Variables - Client
// =============================================================================

/// Environment variable overriding the API endpoint
pub const ENV_ENDPOINT_URL: &str = "CWSINK_ENDPOINT_URL";

/// Environment variable for the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "CWSINK_TIMEOUT_SECS";

/// Environment variable enabling dry-run mode
pub const ENV_DRY_RUN: &str = "CWSINK_DRY_RUN";

// =============================================================================
// Environment Variables - Input
// =============================================================================

/// Environment variable for the metrics input file
pub const ENV_INPUT: &str = "CWSINK_INPUT";

/// Environment variable for the number of metrics per write cycle
pub const ENV_METRIC_BATCH_SIZE: &str = "CWSINK_METRIC_BATCH_SIZE";

// =============================================================================
// Defaults
// =============================================================================

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of metrics buffered before a write cycle runs
pub const DEFAULT_METRIC_BATCH_SIZE: usize = 1000;

// =============================================================================
// Metrics API
// =============================================================================

/// Content type of the JSON protocol
pub const API_CONTENT_TYPE: &str = "application/x-amz-json-1.0";

/// Operation target header value for PutMetricData
pub const API_TARGET_PUT_METRIC_DATA: &str = "GraniteServiceVersion20100801.PutMetricData";
