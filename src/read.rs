use crate::data::{CallRecord, Error};
use log::warn;

/// Trait for doing something with a `CallRecord` read from a CSV file
/// (or received from elsewhere). Used by the main business logic to rate
/// calls into `Bills`, but also used for mock tests to check we get the
/// correct records from reading a CSV stream.
pub(crate) trait CallSink {
    fn use_call(&mut self, call: CallRecord) -> Result<(), Error>;
}

/// Simple CSV importer for `CallRecord`s. Syntactically broken rows abort the
/// run; rows that parse but break a domain rule are logged and skipped.
pub(crate) fn read_calls<R: std::io::Read, S: CallSink>(
    reader: R,
    sink: &mut S,
) -> Result<(), anyhow::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    for result in rdr.deserialize() {
        let call: CallRecord = result?;
        let account = call.account;
        if let Err(e) = sink.use_call(call) {
            warn!("Dropping a call for account {account}: {e}");
        }
    }
    Ok(())
}
