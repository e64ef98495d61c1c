use readbench::{Error, ParseMode};

fn main() -> Result<(), Error> {
    readbench::init_logging();
    readbench::report(
        "../../github/router/test/nyc-gtfs/stop_times.txt",
        ParseMode::Raw,
    )
}
