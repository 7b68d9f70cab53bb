#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .split_whitespace()
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        if args.is_empty() {
            return None;
        }
        let prefix = args.remove(0);

        let cmd = SlashCommand {
            command: prefix,
            args,
        };
        if cmd.is_quit() || cmd.is_chip() || cmd.is_reset() || cmd.is_theme() || cmd.is_help() {
            return Some(cmd);
        }

        return None;
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_chip(&self) -> bool {
        return ["/c", "/chip"].contains(&self.command.as_str());
    }

    pub fn is_reset(&self) -> bool {
        return ["/r", "/reset"].contains(&self.command.as_str());
    }

    pub fn is_theme(&self) -> bool {
        return ["/t", "/theme"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    /// One based chip number passed to `/chip`.
    pub fn chip_number(&self) -> Option<usize> {
        return self
            .args
            .first()
            .and_then(|arg| return arg.parse::<usize>().ok())
            .filter(|number| return *number > 0);
    }
}
