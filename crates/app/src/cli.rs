//! Command-line surface.

use bazaar_domain::HttpMethod;
use clap::{Args, Parser, Subcommand};

/// bazaar - service marketplace API client
#[derive(Parser, Debug)]
#[command(name = "bazaar")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send one raw request through the gateway
    Request(RequestArgs),

    /// Ads endpoints
    #[command(subcommand)]
    Ads(AdsCommand),

    /// Local session state
    #[command(subcommand)]
    Session(SessionCommand),
}

#[derive(Args, Debug)]
pub struct RequestArgs {
    /// HTTP method (GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS)
    pub method: HttpMethod,

    /// Path relative to the API origin, e.g. /api/v1/ads
    pub path: String,

    /// JSON request body
    #[arg(long)]
    pub json: Option<String>,

    /// Override the configured timeout for this call
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Call as the login screen (a 401 keeps the session)
    #[arg(long)]
    pub login_screen: bool,
}

#[derive(Subcommand, Debug)]
pub enum AdsCommand {
    /// List all ads
    #[command(alias = "ls")]
    List,

    /// Show one ad
    Show {
        /// Ad id
        id: String,
    },

    /// List the ads of one user
    User {
        /// User id
        user_id: String,
    },

    /// List the images of one ad
    Images {
        /// Ad id
        id: String,
    },

    /// Delete an ad
    Delete {
        /// Ad id
        id: String,
    },

    /// Toggle an ad between active and inactive
    Toggle {
        /// Ad id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Store credentials from a successful login
    Login {
        /// Access token
        #[arg(long)]
        token: String,

        /// User role
        #[arg(long)]
        role: Option<String>,

        /// User id
        #[arg(long)]
        user_id: Option<String>,
    },

    /// Print the stored session (never the token itself)
    Show,

    /// Forget the stored session
    Logout,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bazaar").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_raw_request() {
        let cli = parse(&[
            "request",
            "post",
            "/api/v1/requests",
            "--json",
            r#"{"serviceId":"s1"}"#,
            "--timeout-ms",
            "500",
            "--login-screen",
        ]);
        let Command::Request(args) = cli.command else {
            panic!("expected request");
        };
        assert_eq!(args.method, HttpMethod::Post);
        assert_eq!(args.path, "/api/v1/requests");
        assert_eq!(args.json.as_deref(), Some(r#"{"serviceId":"s1"}"#));
        assert_eq!(args.timeout_ms, Some(500));
        assert!(args.login_screen);
    }

    #[test]
    fn rejects_unknown_method() {
        let result = Cli::try_parse_from(["bazaar", "request", "FETCH", "/x"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_ads_subcommands() {
        let cli = parse(&["ads", "toggle", "a1"]);
        assert!(matches!(
            cli.command,
            Command::Ads(AdsCommand::Toggle { ref id }) if id == "a1"
        ));

        let cli = parse(&["ads", "ls"]);
        assert!(matches!(cli.command, Command::Ads(AdsCommand::List)));
    }

    #[test]
    fn parses_session_login() {
        let cli = parse(&[
            "session", "login", "--token", "t-1", "--role", "EXPERT", "--user-id", "u-1",
        ]);
        let Command::Session(SessionCommand::Login {
            token,
            role,
            user_id,
        }) = cli.command
        else {
            panic!("expected session login");
        };
        assert_eq!(token, "t-1");
        assert_eq!(role.as_deref(), Some("EXPERT"));
        assert_eq!(user_id.as_deref(), Some("u-1"));
    }

    #[test]
    fn login_requires_token() {
        assert!(Cli::try_parse_from(["bazaar", "session", "login"]).is_err());
    }
}
