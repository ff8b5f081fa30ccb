use std::io::{self, Write};

/// What one line of input asks the agent to do. `execute` and `cancel` only
/// act as commands while something is staged; otherwise they are ordinary
/// utterances.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplCommand {
	Execute,
	Cancel,
	Utterance(String),
}

pub fn classify(line: &str, staged: bool) -> ReplCommand {
	if staged {
		match line.to_lowercase().as_str() {
			"execute" => return ReplCommand::Execute,
			"cancel" => return ReplCommand::Cancel,
			_ => {},
		}
	}

	ReplCommand::Utterance(line.to_string())
}

/// Prompts and reads one trimmed line. `None` means the input stream ended.
pub fn read_line(prompt: &str) -> io::Result<Option<String>> {
	print!("{prompt}");
	io::stdout().flush()?;

	let mut line = String::new();

	if io::stdin().read_line(&mut line)? == 0 {
		return Ok(None);
	}

	Ok(Some(line.trim().to_string()))
}
