//! HTML pages rendered with minijinja from templates compiled into the binary.

use minijinja::{context, Environment};

use crate::llm::Narrative;
use crate::report::draft::DraftReport;
use crate::report::{fmt_points, WeeklyReport};
use crate::{Result, Season};

const BASE: &str = include_str!("../../templates/base.html");
const REPORT: &str = include_str!("../../templates/report.html");
const DRAFT: &str = include_str!("../../templates/draft.html");

pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("base.html", BASE)?;
        env.add_template("report.html", REPORT)?;
        env.add_template("draft.html", DRAFT)?;
        env.add_filter("points", fmt_points);
        Ok(Self { env })
    }

    pub fn render_report(&self, report: &WeeklyReport, narrative: &Narrative) -> Result<String> {
        let html = self.env.get_template("report.html")?.render(context! {
            report => report,
            narrative => narrative,
        })?;
        Ok(html)
    }

    pub fn render_draft(
        &self,
        league_name: &str,
        year: Season,
        draft: &DraftReport,
    ) -> Result<String> {
        let html = self.env.get_template("draft.html")?.render(context! {
            league_name => league_name,
            year => year,
            draft => draft,
        })?;
        Ok(html)
    }
}
