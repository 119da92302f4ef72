//! Command handlers shared by the one-shot subcommands and the interactive
//! shell. Handlers write user-facing output to `out`; diagnostics go
//! through `tracing`.

use std::io::Write;

use alibi_bedrock::client::TextGenerator;
use alibi_core::models::contact::EmergencyContact;
use alibi_storage::excuses::ExcuseStore;
use alibi_storage::kv::KeyValueStore;
use jiff::Timestamp;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::controller::{GeneratorController, NotificationKind, SubmitOutcome};
use crate::emergency::EmergencyChannel;
use crate::render;

pub fn list<S: KeyValueStore>(
    store: &ExcuseStore<S>,
    out: &mut impl Write,
    now: Timestamp,
) -> eyre::Result<()> {
    write!(out, "{}", render::render_list(store.excuses(), now))?;
    Ok(())
}

/// Delete by id. An id that matches nothing is reported but is not an error.
pub fn delete<S: KeyValueStore>(
    store: &mut ExcuseStore<S>,
    id: &str,
    out: &mut impl Write,
) -> eyre::Result<()> {
    let id = id.trim();
    if id.is_empty() {
        eyre::bail!("usage: delete <id>");
    }

    if store.delete(id) {
        writeln!(out, "Deleted {id}.")?;
    } else {
        writeln!(out, "No saved excuse with id {id}.")?;
    }
    Ok(())
}

/// Submit the controller's form and print the outcome. Saves the result
/// when `save` is set. Returns whether an excuse was generated.
pub async fn generate<G: TextGenerator, S: KeyValueStore>(
    controller: &mut GeneratorController<G>,
    store: &mut ExcuseStore<S>,
    save: bool,
    out: &mut impl Write,
) -> eyre::Result<bool> {
    let generated = match controller.submit().await {
        SubmitOutcome::Generated => {
            if let Some(text) = controller.current_excuse() {
                writeln!(out, "Your Generated Excuse:\n  {text}")?;
            }
            true
        }
        SubmitOutcome::Invalid(errors) => {
            writeln!(out, "{errors}")?;
            false
        }
        SubmitOutcome::Failed => false,
    };

    if generated && save {
        save_current(controller, store, out)?;
    }

    show_notifications(controller, out)?;
    Ok(generated)
}

fn save_current<G: TextGenerator, S: KeyValueStore>(
    controller: &mut GeneratorController<G>,
    store: &mut ExcuseStore<S>,
    out: &mut impl Write,
) -> eyre::Result<()> {
    match controller.save(store) {
        Ok(excuse) => writeln!(out, "Saved as {}.", excuse.id)?,
        Err(e) => writeln!(out, "Cannot save: {e}")?,
    }
    Ok(())
}

/// Print and dismiss every queued notification.
pub fn show_notifications<G: TextGenerator>(
    controller: &mut GeneratorController<G>,
    out: &mut impl Write,
) -> eyre::Result<()> {
    for notification in controller.take_notifications() {
        let marker = match notification.kind {
            NotificationKind::Success => "✓",
            NotificationKind::Error => "✗",
        };
        writeln!(
            out,
            "{marker} {}: {}",
            notification.title, notification.description
        )?;
    }
    Ok(())
}

pub async fn emergency_message(
    channel: &impl EmergencyChannel,
    contact: &EmergencyContact,
    message: &str,
    out: &mut impl Write,
) -> eyre::Result<bool> {
    let sent = channel.send_message(contact, message).await;
    if sent {
        writeln!(out, "Message queued for {} ({}).", contact.name, contact.phone_number)?;
    } else {
        writeln!(out, "Could not send message to {}.", contact.name)?;
    }
    Ok(sent)
}

pub async fn emergency_call(
    channel: &impl EmergencyChannel,
    contact: &EmergencyContact,
    out: &mut impl Write,
) -> eyre::Result<bool> {
    let placed = channel.initiate_call(contact).await;
    if placed {
        writeln!(out, "Calling {} ({}).", contact.name, contact.phone_number)?;
    } else {
        writeln!(out, "Could not call {}.", contact.name)?;
    }
    Ok(placed)
}

const SHELL_HELP: &str = "\
Commands:
  context <work|school|social|family>
  urgency <High|Medium|Low|none>
  believability <Very Believable|Somewhat Believable|A Little Stretchy|none>
  form                 show the current form
  generate | g         generate an excuse from the form
  save | s             save the excuse on display
  list | ls            list saved excuses
  delete <id>          delete a saved excuse
  help
  quit | exit";

/// Interactive session over one controller and one store.
///
/// Reads commands line by line from `input` until `quit` or end of input.
/// Command errors are printed and the session continues.
pub async fn run_shell<G, S, R>(
    controller: &mut GeneratorController<G>,
    store: &mut ExcuseStore<S>,
    input: R,
    out: &mut impl Write,
) -> eyre::Result<()>
where
    G: TextGenerator,
    S: KeyValueStore,
    R: AsyncBufRead + Unpin,
{
    writeln!(out, "Craft Your Next Excuse. Type `help` for commands.")?;
    let mut lines = input.lines();

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        let result: eyre::Result<()> = match command {
            "quit" | "exit" => break,
            "help" => writeln!(out, "{SHELL_HELP}").map_err(eyre::Report::from),
            "context" => set_field(&mut controller.form_mut().context, arg, out),
            "urgency" => set_field(&mut controller.form_mut().urgency, arg, out),
            "believability" => set_field(&mut controller.form_mut().believability, arg, out),
            "form" => show_form(controller, out),
            "generate" | "g" => generate(controller, store, false, out).await.map(|_| ()),
            "save" | "s" => save_current(controller, store, out)
                .and_then(|()| show_notifications(controller, out)),
            "list" | "ls" => list(store, out, Timestamp::now()),
            "delete" | "rm" => delete(store, arg, out),
            other => writeln!(out, "Unknown command `{other}`. Type `help` for commands.")
                .map_err(eyre::Report::from),
        };

        if let Err(e) = result {
            writeln!(out, "error: {e}")?;
        }
    }

    Ok(())
}

/// `none` (or nothing) clears the field.
fn set_field(field: &mut String, value: &str, out: &mut impl Write) -> eyre::Result<()> {
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        field.clear();
        writeln!(out, "Cleared.")?;
    } else {
        *field = value.to_string();
        writeln!(out, "Set to {value}.")?;
    }
    Ok(())
}

fn show_form<G: TextGenerator>(
    controller: &GeneratorController<G>,
    out: &mut impl Write,
) -> eyre::Result<()> {
    let form = controller.form();
    let or_unset = |s: &str| if s.is_empty() { "(unset)".to_string() } else { s.to_string() };
    writeln!(out, "Context:       {}", or_unset(&form.context))?;
    writeln!(out, "Urgency:       {}", or_unset(&form.urgency))?;
    writeln!(out, "Believability: {}", or_unset(&form.believability))?;
    if let Some(text) = controller.current_excuse() {
        writeln!(out, "On display:    {text}")?;
    }
    Ok(())
}
