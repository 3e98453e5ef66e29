use crate::selection::transform_each_caret;
use core_model::{CommandError, Host};
use core_state::CommandArgs;
use core_text::motion::first_non_whitespace;

fn step(pt: usize, forward: bool) -> usize {
    if forward { pt + 1 } else { pt.saturating_sub(1) }
}

/// `h` / `l`: one character, never leaving the line unless visual.
pub(super) fn by_characters_in_line(
    host: &mut dyn Host,
    args: &CommandArgs,
) -> Result<(), CommandError> {
    let forward = args.is_forward();
    transform_each_caret(host, |_, pt| step(pt, forward), args.extend, !args.visual);
    Ok(())
}

/// Space / backspace: one character, stepping over newlines unless visual.
pub(super) fn by_characters(host: &mut dyn Host, args: &CommandArgs) -> Result<(), CommandError> {
    let forward = args.is_forward();
    let visual = args.visual;
    transform_each_caret(
        host,
        |h, pt| {
            let mut pt = step(pt, forward);
            if !visual && h.char_at(pt) == Some('\n') {
                pt = step(pt, forward);
            }
            pt.min(h.size())
        },
        args.extend,
        false,
    );
    Ok(())
}

/// `$`: `repeat - 1` lines down, then to the end of that line.
pub(super) fn to_hard_eol(host: &mut dyn Host, args: &CommandArgs) -> Result<(), CommandError> {
    let repeat = args.repeat.unwrap_or(1);
    if repeat > 1 {
        let down = CommandArgs::new()
            .with_forward(true)
            .with_extend(args.extend)
            .with_param("by", "lines");
        for _ in 1..repeat {
            host.run_command("move", &down)?;
        }
    }
    transform_each_caret(host, |h, pt| h.line(pt).end(), args.extend, false);
    Ok(())
}

/// `^`
pub(super) fn to_first_non_white_space_character(
    host: &mut dyn Host,
    args: &CommandArgs,
) -> Result<(), CommandError> {
    transform_each_caret(
        host,
        |h, pt| first_non_whitespace(h.buffer(), pt),
        args.extend,
        false,
    );
    Ok(())
}

/// Target of `f`/`t` (forward) or `F`/`T` (backward) within `pt`'s line. A
/// forward search skips the character at `pt`; a forward result is exclusive
/// (one past the target, or the target itself with `before`).
fn find_in_line(host: &dyn Host, pt: usize, c: char, forward: bool, before: bool) -> Option<usize> {
    let line = host.line(pt);
    if forward {
        (pt + 1..line.end())
            .find(|&j| host.char_at(j) == Some(c))
            .map(|j| if before { j } else { j + 1 })
    } else {
        (line.begin()..pt.min(line.end()))
            .rev()
            .find(|&j| host.char_at(j) == Some(c))
            .map(|j| if before { j + 1 } else { j })
    }
}

/// `f`, `t`, `F`, `T`: stays put when the character is not on the line.
pub(super) fn to_character(host: &mut dyn Host, args: &CommandArgs) -> Result<(), CommandError> {
    let c = args
        .character
        .ok_or_else(|| CommandError::invalid("vi_move_to_character", "missing `character`"))?;
    let forward = args.is_forward();
    let before = args.param_bool("before").unwrap_or(false);
    transform_each_caret(
        host,
        |h, pt| find_in_line(h, pt, c, forward, before).unwrap_or(pt),
        args.extend,
        false,
    );
    Ok(())
}

/// `G` / `NG`: a repeat of 1 means no count was typed, which goes to the end
/// of the buffer.
pub(super) fn goto_line(host: &mut dyn Host, args: &CommandArgs) -> Result<(), CommandError> {
    let repeat = args.repeat.unwrap_or(1).max(1);
    if repeat == 1 {
        let to_end = CommandArgs::new()
            .with_extend(args.extend)
            .with_param("to", "eof");
        return host.run_command("move_to", &to_end);
    }
    let target = host.text_point(repeat as usize - 1, 0);
    transform_each_caret(host, |_, _| target, args.extend, false);
    Ok(())
}
