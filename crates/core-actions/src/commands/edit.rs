use crate::selection::{
    clip_empty_carets_to_line_content, shrink_selections, transform_each_caret,
    transform_each_range,
};
use core_model::commands::{CaretPlacement, RegionEdit, apply_region_edits};
use core_model::{CommandError, Host};
use core_state::CommandArgs;
use core_text::Region;
use tracing::trace;

fn kill(host: &mut dyn Host, forward: bool) -> Result<(), CommandError> {
    host.run_command("add_to_kill_ring", &CommandArgs::new().with_forward(forward))
}

/// Sentinel action: the selection a motion builds is the result.
pub(super) fn visual(_host: &mut dyn Host, _args: &CommandArgs) -> Result<(), CommandError> {
    Ok(())
}

pub(super) fn delete(host: &mut dyn Host, _args: &CommandArgs) -> Result<(), CommandError> {
    kill(host, false)?;
    host.run_command("left_delete", &CommandArgs::new())
}

pub(super) fn right_delete(host: &mut dyn Host, _args: &CommandArgs) -> Result<(), CommandError> {
    kill(host, true)?;
    host.run_command("right_delete", &CommandArgs::new())?;
    clip_empty_carets_to_line_content(host);
    Ok(())
}

/// Yank, leaving each caret where its selection started.
pub(super) fn copy(host: &mut dyn Host, _args: &CommandArgs) -> Result<(), CommandError> {
    kill(host, true)?;
    transform_each_range(host, |_, r| Some(Region::caret(r.a)));
    Ok(())
}

/// `p`: characterwise text goes after the character under the caret.
pub(super) fn paste_right(host: &mut dyn Host, _args: &CommandArgs) -> Result<(), CommandError> {
    transform_each_caret(
        host,
        |h, pt| {
            if h.char_at(pt) == Some('\n') {
                pt
            } else {
                (pt + 1).min(h.size())
            }
        },
        false,
        false,
    );
    host.run_command("paste_from_kill_ring", &CommandArgs::new().with_forward(true))
}

/// `P`
pub(super) fn paste_left(host: &mut dyn Host, _args: &CommandArgs) -> Result<(), CommandError> {
    host.run_command(
        "paste_from_kill_ring",
        &CommandArgs::new().with_forward(false),
    )
}

/// Text ending in a newline is pasted linewise: below the current line when
/// forward, above it otherwise. Anything else replaces each region.
pub(super) fn paste_from_kill_ring(
    host: &mut dyn Host,
    args: &CommandArgs,
) -> Result<(), CommandError> {
    let ring = host.kill_ring_mut();
    ring.seal();
    let Some(text) = ring.top().map(str::to_string) else {
        return Err(CommandError::Disabled("paste_from_kill_ring".to_string()));
    };
    let forward = args.is_forward();
    let linewise = text.ends_with('\n');
    trace!(target: "host.command", linewise, forward, chars = text.chars().count(), "paste");
    let edits: Vec<RegionEdit> = host
        .selection()
        .iter()
        .map(|r| {
            let span = if !linewise {
                *r
            } else if forward {
                Region::caret(host.full_line(r.end()).end())
            } else {
                Region::caret(host.line(r.begin()).begin())
            };
            RegionEdit::replace(span, text.clone(), CaretPlacement::Start)
        })
        .collect();
    apply_region_edits(host, edits);
    Ok(())
}

/// `r`: every selected character, or the one under a caret, becomes
/// `character`. Newlines are kept.
pub(super) fn replace_character(
    host: &mut dyn Host,
    args: &CommandArgs,
) -> Result<(), CommandError> {
    let c = args
        .character
        .ok_or_else(|| CommandError::invalid("replace_character", "missing `character`"))?;
    let size = host.size();
    let edits: Vec<RegionEdit> = host
        .selection()
        .iter()
        .map(|r| {
            let span = if r.is_empty() {
                Region::new(r.b, (r.b + 1).min(size))
            } else {
                Region::new(r.begin(), r.end())
            };
            let text: String = host
                .substr(span)
                .chars()
                .map(|ch| if ch == '\n' { ch } else { c })
                .collect();
            RegionEdit::replace(span, text, CaretPlacement::Start)
        })
        .collect();
    apply_region_edits(host, edits);
    Ok(())
}

pub(super) fn shrink(host: &mut dyn Host, _args: &CommandArgs) -> Result<(), CommandError> {
    shrink_selections(host);
    Ok(())
}
