use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SupervisorError {
    #[error("worker executable not found: {0}")]
    ExecutableNotFound(PathBuf),

    #[error("failed to spawn worker {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("worker already running (pid {0})")]
    AlreadyRunning(u32),

    #[error("could not resolve worker layout: {0}")]
    Layout(String),
}

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("failed to create window: {0}")]
    Create(String),

    #[error("webview error: {0}")]
    WebView(String),
}

#[derive(Debug, thiserror::Error)]
pub enum BlurkitError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Supervisor(#[from] SupervisorError),

    #[error(transparent)]
    Window(#[from] WindowError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("window.width = 0 is out of range".into());
        assert_eq!(
            err.to_string(),
            "config validation error: window.width = 0 is out of range"
        );
    }

    #[test]
    fn supervisor_error_display() {
        let err = SupervisorError::ExecutableNotFound(PathBuf::from("/opt/app/BlurkitTool"));
        assert_eq!(
            err.to_string(),
            "worker executable not found: /opt/app/BlurkitTool"
        );

        let err = SupervisorError::AlreadyRunning(4242);
        assert_eq!(err.to_string(), "worker already running (pid 4242)");
    }

    #[test]
    fn spawn_error_keeps_io_source() {
        let err = SupervisorError::Spawn {
            path: PathBuf::from("/opt/app/BlurkitTool"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/opt/app/BlurkitTool"));
        assert!(err.to_string().contains("denied"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn blurkit_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: BlurkitError = config_err.into();
        assert!(matches!(err, BlurkitError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn blurkit_error_from_supervisor() {
        let sup_err = SupervisorError::Layout("no current exe".into());
        let err: BlurkitError = sup_err.into();
        assert!(matches!(err, BlurkitError::Supervisor(_)));
        assert!(err.to_string().contains("no current exe"));
    }

    #[test]
    fn blurkit_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: BlurkitError = io_err.into();
        assert!(matches!(err, BlurkitError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn window_error_display() {
        let err = WindowError::Create("no display".into());
        assert_eq!(err.to_string(), "failed to create window: no display");

        let err = WindowError::WebView("webkit missing".into());
        assert_eq!(err.to_string(), "webview error: webkit missing");

        let err: BlurkitError = WindowError::WebView("x".into()).into();
        assert!(matches!(err, BlurkitError::Window(_)));
    }
}
