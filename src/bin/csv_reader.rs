use readbench::{Error, ParseMode};

fn main() -> Result<(), Error> {
    readbench::init_logging();
    readbench::report("stop_times.txt", ParseMode::Csv)
}
