use anyhow::{anyhow, bail, Result};
use wizard_core::Field;

pub(crate) const HELP: &str = "\
Commands:
  set <field> <value>   edit a field (fullName, email, department, role,
                        employmentType, officeLocation, notes, photo)
  pick <field> <n>      choose suggestion n for department or officeLocation
  done <field>          leave a suggestion field; its list closes shortly
  next                  continue to step 2
  submit                send both records
  clear                 reset the form and delete the stored draft
  show                  print the form
  help                  this text
  quit                  leave the wizard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Set { field: Field, value: String },
    /// `index` is 0-based; the user types 1-based numbers.
    Pick { field: Field, index: usize },
    Leave { field: Field },
    Next,
    Submit,
    Clear,
    Show,
    Help,
    Quit,
}

pub(crate) fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim_start();

    match verb.to_ascii_lowercase().as_str() {
        "set" => {
            let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            Ok(Command::Set {
                field: parse_field(name)?,
                value: value.trim().to_string(),
            })
        }
        "pick" => {
            let (name, number) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| anyhow!("usage: pick <field> <n>"))?;
            let field = suggestion_field(name)?;
            let number: usize = number
                .trim()
                .parse()
                .map_err(|_| anyhow!("not a suggestion number: {}", number.trim()))?;
            let index = number
                .checked_sub(1)
                .ok_or_else(|| anyhow!("suggestions are numbered from 1"))?;
            Ok(Command::Pick { field, index })
        }
        "done" => {
            let field = suggestion_field(rest.trim())?;
            Ok(Command::Leave { field })
        }
        "next" => Ok(Command::Next),
        "submit" => Ok(Command::Submit),
        "clear" => Ok(Command::Clear),
        "show" | "" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => bail!("unknown command '{other}', try 'help'"),
    }
}

fn parse_field(name: &str) -> Result<Field> {
    Field::from_name(name).ok_or_else(|| anyhow!("unknown field '{name}'"))
}

fn suggestion_field(name: &str) -> Result<Field> {
    let field = parse_field(name)?;
    if !matches!(field, Field::Department | Field::OfficeLocation) {
        bail!("{} has no suggestions", field.name());
    }
    Ok(field)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn set_keeps_spaces_inside_the_value() {
        assert_eq!(
            parse_command("set fullName  Jane  Doe ").unwrap(),
            Command::Set {
                field: Field::FullName,
                value: "Jane  Doe".into(),
            }
        );
    }

    #[test]
    fn set_without_value_clears_the_field() {
        assert_eq!(
            parse_command("set notes").unwrap(),
            Command::Set {
                field: Field::Notes,
                value: String::new(),
            }
        );
    }

    #[test]
    fn pick_is_one_based() {
        assert_eq!(
            parse_command("pick officeLocation 2").unwrap(),
            Command::Pick {
                field: Field::OfficeLocation,
                index: 1,
            }
        );
        assert!(parse_command("pick department 0").is_err());
        assert!(parse_command("pick notes 1").is_err());
    }

    #[test]
    fn done_only_applies_to_suggestion_fields() {
        assert_eq!(
            parse_command("done department").unwrap(),
            Command::Leave {
                field: Field::Department,
            }
        );
        assert!(parse_command("done email").is_err());
    }

    #[test]
    fn verbs_are_case_insensitive() {
        assert_eq!(parse_command("SUBMIT").unwrap(), Command::Submit);
        assert_eq!(parse_command("  ").unwrap(), Command::Show);
        assert_eq!(parse_command("exit").unwrap(), Command::Quit);
    }

    #[test]
    fn unknown_input_is_rejected() {
        assert!(parse_command("dance").is_err());
        assert!(parse_command("set shoeSize 42").is_err());
    }
}
