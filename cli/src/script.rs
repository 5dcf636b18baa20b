//! Line-oriented driver scripts.
//!
//! One command per line. Blank lines and lines starting with `#` are skipped.
//! Free text arguments run to the end of the line, and `\n` inside them
//! becomes a newline.

use anyhow::Context;
use anyhow::bail;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Type(String),
    PasteText {
        start: usize,
        end: usize,
        text: String,
    },
    PasteFile {
        mime_type: String,
        name: String,
    },
    DropText(String),
    DropFile {
        mime_type: String,
        name: String,
    },
    Remove(usize),
    Undo,
    Redo,
    Template(String),
    Enter,
    ShiftEnter,
    Submit,
    Navigate,
    FailNextPublish,
    FailNextUpload,
    State,
}

/// Parse one script line. `Ok(None)` for blank and comment lines.
pub fn parse_line(line: &str) -> anyhow::Result<Option<ScriptCommand>> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (name, rest) = match trimmed.split_once(' ') {
        Some((name, rest)) => (name, rest),
        None => (trimmed, ""),
    };

    let command = match name {
        "type" => ScriptCommand::Type(unescape(rest)),
        "paste-text" => {
            let (start, rest) = next_word(rest, "paste-text", "start")?;
            let (end, text) = next_word(rest, "paste-text", "end")?;
            ScriptCommand::PasteText {
                start: parse_index(start, "start")?,
                end: parse_index(end, "end")?,
                text: unescape(text),
            }
        }
        "paste-file" => {
            let (mime_type, name) = file_args(rest, "paste-file")?;
            ScriptCommand::PasteFile { mime_type, name }
        }
        "drop-text" => ScriptCommand::DropText(unescape(rest)),
        "drop-file" => {
            let (mime_type, name) = file_args(rest, "drop-file")?;
            ScriptCommand::DropFile { mime_type, name }
        }
        "remove" => {
            let (index, _) = next_word(rest, "remove", "index")?;
            ScriptCommand::Remove(parse_index(index, "index")?)
        }
        "template" => ScriptCommand::Template(unescape(rest)),
        "undo" => no_args(rest, name, ScriptCommand::Undo)?,
        "redo" => no_args(rest, name, ScriptCommand::Redo)?,
        "enter" => no_args(rest, name, ScriptCommand::Enter)?,
        "shift-enter" => no_args(rest, name, ScriptCommand::ShiftEnter)?,
        "submit" => no_args(rest, name, ScriptCommand::Submit)?,
        "navigate" => no_args(rest, name, ScriptCommand::Navigate)?,
        "fail-next-publish" => no_args(rest, name, ScriptCommand::FailNextPublish)?,
        "fail-next-upload" => no_args(rest, name, ScriptCommand::FailNextUpload)?,
        "state" => no_args(rest, name, ScriptCommand::State)?,
        other => bail!("unknown command `{other}`"),
    };
    Ok(Some(command))
}

/// Parse a whole script, reporting the 1-based line of the first bad command.
pub fn parse_script(script: &str) -> anyhow::Result<Vec<ScriptCommand>> {
    let mut commands = Vec::new();
    for (index, line) in script.lines().enumerate() {
        let parsed = parse_line(line)
            .with_context(|| format!("line {}", index + 1))?;
        commands.extend(parsed);
    }
    Ok(commands)
}

fn next_word<'a>(input: &'a str, command: &str, what: &str) -> anyhow::Result<(&'a str, &'a str)> {
    let input = input.trim_start();
    if input.is_empty() {
        bail!("`{command}` expects {what}");
    }
    Ok(match input.split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (input, ""),
    })
}

fn file_args(rest: &str, command: &str) -> anyhow::Result<(String, String)> {
    let (mime_type, name) = next_word(rest, command, "a MIME type")?;
    let name = name.trim();
    if name.is_empty() {
        bail!("`{command}` expects a file name");
    }
    Ok((mime_type.to_string(), name.to_string()))
}

fn parse_index(raw: &str, what: &str) -> anyhow::Result<usize> {
    raw.parse()
        .with_context(|| format!("{what} must be a non-negative integer, got `{raw}`"))
}

fn no_args(rest: &str, name: &str, command: ScriptCommand) -> anyhow::Result<ScriptCommand> {
    if !rest.trim().is_empty() {
        bail!("`{name}` takes no arguments");
    }
    Ok(command)
}

fn unescape(text: &str) -> String {
    text.replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn free_text_keeps_inner_spacing() {
        assert_eq!(
            parse_line("type Road  closed\\nat exit 12").expect("parse"),
            Some(ScriptCommand::Type("Road  closed\nat exit 12".to_string()))
        );
        assert_eq!(
            parse_line("type").expect("parse"),
            Some(ScriptCommand::Type(String::new()))
        );
    }

    #[test]
    fn paste_text_takes_selection_then_text() {
        assert_eq!(
            parse_line("paste-text 1 1 XY").expect("parse"),
            Some(ScriptCommand::PasteText {
                start: 1,
                end: 1,
                text: "XY".to_string()
            })
        );
        let err = parse_line("paste-text 1").expect_err("missing end");
        assert!(err.to_string().contains("end"), "{err}");
        let err = parse_line("paste-text one 2 x").expect_err("bad start");
        assert!(err.to_string().contains("start"), "{err}");
    }

    #[test]
    fn file_commands_need_mime_and_name() {
        assert_eq!(
            parse_line("drop-file application/pdf route plan.pdf").expect("parse"),
            Some(ScriptCommand::DropFile {
                mime_type: "application/pdf".to_string(),
                name: "route plan.pdf".to_string()
            })
        );
        assert!(parse_line("paste-file image/png").is_err());
    }

    #[test]
    fn bare_commands_reject_arguments() {
        assert_eq!(parse_line("undo").expect("parse"), Some(ScriptCommand::Undo));
        assert!(parse_line("submit now").is_err());
    }

    #[test]
    fn script_skips_comments_and_reports_line_numbers() {
        let script = "# draft\ntype Hi\n\nenter\n";
        assert_eq!(
            parse_script(script).expect("parse"),
            vec![ScriptCommand::Type("Hi".to_string()), ScriptCommand::Enter]
        );

        let err = parse_script("type Hi\nfrobnicate\n").expect_err("unknown");
        assert_eq!(err.to_string(), "line 2");
        assert_eq!(
            err.root_cause().to_string(),
            "unknown command `frobnicate`"
        );
    }
}
