use log::{debug, info};

use crate::output::{Message, SessionOutput};
use crate::quiz::report::FinalReport;
use crate::quiz::State;


#[derive(Clone, Debug)]
pub struct ResultsState<O> {
    report: FinalReport,
    output: O,
}

impl<O> ResultsState<O> {
    pub fn new(report: FinalReport, output: O) -> Self {
        ResultsState { report, output }
    }

    pub fn report(&self) -> &FinalReport {
        &self.report
    }
}

impl<O: SessionOutput> State for ResultsState<O> {
    fn on_tick(&mut self) {
        debug!("Ignoring tick, the quiz is finished");
    }

    fn on_begin(&mut self) {
        info!(
            "Quiz finished with {}/{} ({:.2}%)",
            self.report.score, self.report.total_possible, self.report.percentage
        );
        self.output.say(&Message::Results(self.report.clone()));
    }

    fn is_over(&self) -> bool {
        false
    }
}
