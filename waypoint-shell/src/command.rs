//! Shell command parsing
//!
//! One command per line:
//! - `push <path>` / `replace <path>`
//! - `name <route> [key=value ...]`
//! - `back`, `forward`, `go <delta>`
//! - `state`, `quit`

use waypoint_core::RouteParams;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Push(String),
    Replace(String),
    Named { route: String, params: RouteParams },
    Back,
    Forward,
    Go(isize),
    State,
    Quit,
}

impl ShellCommand {
    /// Parse one input line; blank lines and `#` comments yield `Ok(None)`
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            return Ok(None);
        };
        let verb = verb.to_lowercase();

        let command = match verb.as_str() {
            "push" | "p" => ShellCommand::Push(Self::path_arg(&verb, parts.next())?),
            "replace" | "r" => ShellCommand::Replace(Self::path_arg(&verb, parts.next())?),
            "name" | "n" => {
                let route = parts
                    .next()
                    .ok_or_else(|| "name requires a route name".to_string())?
                    .to_string();
                let mut params = RouteParams::new();
                for pair in parts {
                    let (key, value) = pair
                        .split_once('=')
                        .ok_or_else(|| format!("expected key=value, got {:?}", pair))?;
                    params.insert(key.to_string(), value.to_string());
                }
                ShellCommand::Named { route, params }
            }
            "back" | "b" => ShellCommand::Back,
            "forward" | "f" => ShellCommand::Forward,
            "go" => {
                let delta = parts
                    .next()
                    .ok_or_else(|| "go requires a delta".to_string())?;
                let delta = delta
                    .parse::<isize>()
                    .map_err(|_| format!("invalid delta {:?}", delta))?;
                ShellCommand::Go(delta)
            }
            "state" | "s" => ShellCommand::State,
            "quit" | "exit" | "q" => ShellCommand::Quit,
            _ => return Err(format!("unknown command {:?}", verb)),
        };

        Ok(Some(command))
    }

    fn path_arg(verb: &str, arg: Option<&str>) -> Result<String, String> {
        arg.map(str::to_string)
            .ok_or_else(|| format!("{} requires a path", verb))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation() {
        assert_eq!(
            ShellCommand::parse("push /presale").unwrap(),
            Some(ShellCommand::Push("/presale".to_string()))
        );
        assert_eq!(
            ShellCommand::parse("  R /mintusdc ").unwrap(),
            Some(ShellCommand::Replace("/mintusdc".to_string()))
        );
        assert!(ShellCommand::parse("push").is_err());
    }

    #[test]
    fn test_parse_named() {
        let command = ShellCommand::parse("name Mint token=usdc").unwrap().unwrap();
        let mut params = RouteParams::new();
        params.insert("token".to_string(), "usdc".to_string());
        assert_eq!(
            command,
            ShellCommand::Named {
                route: "Mint".to_string(),
                params
            }
        );
        assert!(ShellCommand::parse("name Mint token").is_err());
    }

    #[test]
    fn test_parse_history_moves() {
        assert_eq!(ShellCommand::parse("back").unwrap(), Some(ShellCommand::Back));
        assert_eq!(ShellCommand::parse("f").unwrap(), Some(ShellCommand::Forward));
        assert_eq!(ShellCommand::parse("go -2").unwrap(), Some(ShellCommand::Go(-2)));
        assert!(ShellCommand::parse("go two").is_err());
    }

    #[test]
    fn test_parse_skips_blank_and_comments() {
        assert_eq!(ShellCommand::parse("").unwrap(), None);
        assert_eq!(ShellCommand::parse("# note").unwrap(), None);
        assert!(ShellCommand::parse("jump /x").is_err());
    }
}
