//! The transcode loop.
//!
//! Drives a conversion program over a whole input buffer: reserves output
//! headroom before every unit, walks the dispatch nodes (or hands the
//! input to a stream program), invokes function hooks, and runs the finish
//! hook after the last unit. Any failure terminates the loop immediately;
//! the session and everything written into it are discarded, so no partial
//! output is ever observable.

use crate::dispatch::{Action, DispatchNode, FnSelector, NodeRef};
use crate::error::Interrupt;
use crate::session::TranscodingSession;
use crate::transcoder::{Program, Transcoder};

/// Runs a full-buffer conversion with the default initial output capacity
/// (input length plus one unit of headroom).
pub(crate) fn run(transcoder: &Transcoder, input: &[u8]) -> Result<Vec<u8>, Interrupt> {
    run_with_capacity(transcoder, input, input.len() + transcoder.max_output())
}

/// Runs a full-buffer conversion with an explicit initial output capacity.
///
/// The capacity only sizes the first allocation; the growth protocol makes
/// the result independent of it.
pub(crate) fn run_with_capacity(
    transcoder: &Transcoder,
    input: &[u8],
    capacity: usize,
) -> Result<Vec<u8>, Interrupt> {
    let mut session = TranscodingSession::new(transcoder.max_output(), capacity);
    let consumed = match &transcoder.program {
        Program::Table { nodes, root } => {
            run_table(transcoder, nodes, *root, input, &mut session)?
        }
        Program::Stream(scan) => scan(input, &mut session)?,
    };
    if consumed < input.len() {
        return Err(Interrupt::Incomplete { consumed });
    }
    if let Some(finish) = transcoder.hooks.finish {
        session.begin_unit();
        let emitted = finish(&mut session.state).map_err(|e| e.at(input.len()))?;
        session.write(emitted.as_slice());
    }
    Ok(session.into_output())
}

/// One unit at a time: descend from the root until a terminal action.
fn run_table(
    transcoder: &Transcoder,
    nodes: &[DispatchNode],
    root: NodeRef,
    input: &[u8],
    session: &mut TranscodingSession,
) -> Result<usize, Interrupt> {
    let mut pos = 0;
    while pos < input.len() {
        session.begin_unit();
        let start = pos;
        let mut node = &nodes[root.0 as usize];
        loop {
            let byte = input[pos];
            pos += 1;
            match node.action(byte) {
                Action::Descend(next) => {
                    if pos == input.len() {
                        // Truncated multi-byte unit; in a whole-buffer
                        // conversion there is no more input coming.
                        return Err(Interrupt::Illegal(start));
                    }
                    node = &nodes[next.0 as usize];
                }
                Action::CopyVerbatim => {
                    session.write(&input[start..pos]);
                    break;
                }
                Action::Literal(bytes) => {
                    session.write(bytes.as_slice());
                    break;
                }
                Action::Drop => break,
                Action::CallFunction(selector) => {
                    let hook = match selector {
                        FnSelector::ShiftIn => transcoder.hooks.shift_in,
                        FnSelector::ShiftOut => transcoder.hooks.shift_out,
                    };
                    let Some(hook) = hook else {
                        // Registration validates every selector in the
                        // program against the bound hooks.
                        unreachable!("function action without a bound hook");
                    };
                    let emitted = hook(&mut session.state, &input[start..pos])
                        .map_err(|e| e.at(start))?;
                    debug_assert!(emitted.as_slice().len() <= transcoder.max_output());
                    session.write(emitted.as_slice());
                    break;
                }
                Action::Illegal => return Err(Interrupt::Illegal(start)),
                Action::Undefined => return Err(Interrupt::Undefined(start)),
            }
        }
    }
    Ok(pos)
}
