//! Processor seam and stdin/stdout driver.

use std::io::{Read, Write};

use tracing::{debug, error};

use crate::error::KrmError;
use crate::resource_list::ResourceList;
use crate::result::FunctionResult;

/// A KRM function: transforms or validates a ResourceList in place.
///
/// Per-item problems should be appended to `rl.results`. Returning `Err`
/// marks the whole invocation as failed.
pub trait ResourceListProcessor {
    fn process(&self, rl: &mut ResourceList) -> Result<(), KrmError>;
}

/// Reads a ResourceList from `input`, runs `processor` on it and writes the
/// result to `output`.
///
/// A processor failure is recorded as an error result; the list is still
/// written so the caller sees every diagnostic. Only I/O and envelope
/// errors are returned.
pub fn run<P, R, W>(processor: &P, input: R, output: W) -> Result<ResourceList, KrmError>
where
    P: ResourceListProcessor + ?Sized,
    R: Read,
    W: Write,
{
    let mut rl = ResourceList::read(input)?;

    if let Err(e) = processor.process(&mut rl) {
        error!("Function failed: {}", e);
        rl.push_result(FunctionResult::error(e.to_string()));
    }

    debug!("Writing ResourceList with {} items and {} results", rl.items.len(), rl.results.len());
    rl.write(output)?;
    Ok(rl)
}
