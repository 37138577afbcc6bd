//! HTTP-flavoured plugin module used by the integration tests

use plughost::plugin::api::{CommandMetadata, CommandResult, Plugin, TypeDescriptor};

struct HttpPlugin;

fn http_method() -> TypeDescriptor {
    TypeDescriptor::discrete("HTTPMethod", [("GET", 0), ("POST", 1), ("PATCH", 2)])
}

impl Plugin for HttpPlugin {
    fn name(&self) -> &str {
        "http"
    }

    fn execute_command(&self, command_name: &str, args: &[String]) -> CommandResult {
        match command_name {
            "get" => match args.first() {
                Some(url) => CommandResult::success(format!("GET {}", url)),
                None => CommandResult::failure("Missing url"),
            },
            "send" => match args {
                [method, url] => CommandResult::success(format!("{} {}", method, url)),
                _ => CommandResult::failure("Usage: send <method> <url>"),
            },
            "fail" => CommandResult::failure("Request refused"),
            "quiet" => CommandResult::silent("nothing to see"),
            "boom" => panic!("kaboom"),
            other => CommandResult::unknown_command(other),
        }
    }

    fn list_commands(&self) -> Vec<CommandMetadata> {
        vec![
            CommandMetadata::new("get", "Fetch a url").with_parameter("url", TypeDescriptor::string()),
            CommandMetadata::new("send", "Send a request")
                .with_parameter("method", http_method())
                .with_parameter("url", TypeDescriptor::string()),
            CommandMetadata::new("fail", "Always fails"),
            CommandMetadata::new("quiet", "Prints nothing"),
            CommandMetadata::new("boom", "Panics"),
        ]
    }
}

plughost::declare_plugin!(HttpPlugin);
