//! Interactive playground session
//!
//! Line-oriented stand-in for the playground's control surface. Each
//! command goes through the bounded setters of the live state; the simulated
//! document is restyled from the fresh snapshot and every probe re-reads its
//! element afterwards.

use crate::document::{element_for, SimulatedDocument};
use crate::report;
use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};
use std::sync::Arc;
use typescale_core::events::{Event, EventDispatcher};
use typescale_core::probe::{Measurement, MeasurementProbe};
use typescale_theme::{FontPreset, PlaygroundState, SubscriptionId, Variant, ViewportTracker};

pub const HELP: &str = "\
commands:
  set font <name>            IBM Plex Sans | Inter | Poppins | Roboto | System
  set base <px>              8 | 10 | 12 | 14 | 16
  set ratio <value>          1.0 ..= 2.0
  set factor <value>         1 ..= 8
  set disable-align <bool>
  set xl <bool>              include the xl breakpoint
  weight <variant> <weight>  100 ..= 900
  spacing <variant> <em>     -0.2 ..= 0.2
  resize <width> [height]
  show | breakpoints | reset | help | quit";

/// A parsed session command
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Font(FontPreset),
    BaseSize(f32),
    Ratio(f32),
    Factor(f32),
    DisableAlign(bool),
    IncludeXl(bool),
    Weight(Variant, u16),
    Spacing(Variant, f32),
    Resize { width: u32, height: u32 },
    Show,
    Breakpoints,
    Reset,
    Help,
    Quit,
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => bail!("expected a boolean, got `{other}`"),
    }
}

fn parse_number<T: std::str::FromStr>(value: Option<&str>, what: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = value.with_context(|| format!("missing {what}"))?;
    value
        .parse()
        .with_context(|| format!("invalid {what} `{value}`"))
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            bail!("empty command");
        };

        let command = match head {
            "set" => {
                let key = words.next().context("missing parameter name")?;
                match key {
                    "font" => {
                        let name = words.collect::<Vec<_>>().join(" ");
                        Command::Font(name.parse()?)
                    }
                    "base" => Command::BaseSize(parse_number(words.next(), "base size")?),
                    "ratio" => Command::Ratio(parse_number(words.next(), "ratio")?),
                    "factor" => Command::Factor(parse_number(words.next(), "factor")?),
                    "disable-align" => {
                        Command::DisableAlign(parse_bool(words.next().context("missing value")?)?)
                    }
                    "xl" => Command::IncludeXl(parse_bool(words.next().context("missing value")?)?),
                    other => bail!("unknown parameter `{other}`"),
                }
            }
            "weight" => {
                let variant = words.next().context("missing variant")?.parse::<Variant>()?;
                Command::Weight(variant, parse_number(words.next(), "weight")?)
            }
            "spacing" => {
                let variant = words.next().context("missing variant")?.parse::<Variant>()?;
                Command::Spacing(variant, parse_number(words.next(), "letter spacing")?)
            }
            "resize" => {
                let width = parse_number(words.next(), "width")?;
                let height = match words.next() {
                    Some(h) => parse_number(Some(h), "height")?,
                    None => 800,
                };
                Command::Resize { width, height }
            }
            "show" => Command::Show,
            "breakpoints" => Command::Breakpoints,
            "reset" => Command::Reset,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => bail!("unknown command `{other}` (try `help`)"),
        };
        Ok(command)
    }
}

pub struct Session<'a> {
    state: &'a PlaygroundState,
    document: Arc<SimulatedDocument>,
    viewport: Arc<ViewportTracker>,
    dispatcher: EventDispatcher,
    probes: Vec<(Variant, MeasurementProbe)>,
    restyle: SubscriptionId,
}

impl<'a> Session<'a> {
    pub fn new(state: &'a PlaygroundState, width: u32) -> Self {
        let snapshot = state.snapshot();
        let table = snapshot.base.breakpoints;
        let document = Arc::new(SimulatedDocument::new(snapshot, width as f32));

        let target = document.clone();
        let restyle = state.subscribe(move |snapshot| target.restyle(snapshot.clone()));

        let mut dispatcher = EventDispatcher::new();
        let viewport = Arc::new(ViewportTracker::new(table, width as f32));
        viewport.watch(&mut dispatcher);

        let probes = Variant::all()
            .iter()
            .map(|variant| {
                let probe = MeasurementProbe::new(document.clone());
                probe.attach(&mut dispatcher, element_for(*variant));
                (*variant, probe)
            })
            .collect();

        Self {
            state,
            document,
            viewport,
            dispatcher,
            probes,
            restyle,
        }
    }

    /// Latest probe readings in display order
    pub fn measurements(&self) -> Vec<(Variant, Measurement)> {
        self.probes
            .iter()
            .map(|(variant, probe)| (*variant, probe.measurement()))
            .collect()
    }

    /// Status line, the variant table, and the notes footer
    pub fn render(&self) -> String {
        let snapshot = self.state.snapshot();
        let params = self.state.parameters();
        format!(
            "{}\n\n{}\n{}",
            report::status_line(
                &snapshot,
                params.modular_ratio,
                self.viewport.breakpoint(),
                self.viewport.width()
            ),
            report::variant_table(&snapshot, &self.measurements()),
            report::NOTES
        )
    }

    /// Run one command. `Ok(None)` means quit.
    pub fn execute(&mut self, command: Command) -> Result<Option<String>> {
        let output = match command {
            Command::Font(font) => {
                self.state.set_font(font);
                format!("font = {font}")
            }
            Command::BaseSize(px) => {
                self.state.set_base_font_size(px)?;
                format!("base = {px}px")
            }
            Command::Ratio(ratio) => format!("ratio = {}", self.state.set_modular_ratio(ratio)?),
            Command::Factor(factor) => format!("factor = {}", self.state.set_factor(factor)?),
            Command::DisableAlign(disable) => {
                self.state.set_disable_align(disable);
                format!("disable-align = {disable}")
            }
            Command::IncludeXl(include) => {
                self.state.set_include_xl(include);
                format!("xl = {include}")
            }
            Command::Weight(variant, weight) => {
                self.state.set_font_weight(variant, weight)?;
                format!("{variant} weight = {weight}")
            }
            Command::Spacing(variant, em) => {
                let em = self.state.set_letter_spacing(variant, em)?;
                format!("{variant} letter spacing = {em:.3}em")
            }
            Command::Resize { width, height } => {
                self.document.set_viewport_width(width as f32);
                self.dispatcher
                    .dispatch(&mut Event::viewport_resize(width, height));
                format!("viewport = {width}x{height} ({})", self.viewport.breakpoint())
            }
            Command::Show => return Ok(Some(self.render())),
            Command::Breakpoints => {
                return Ok(Some(report::breakpoint_table(&self.state.snapshot())))
            }
            Command::Reset => {
                self.state.reset();
                "parameters reset".to_string()
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(None),
        };

        // Any change above may resize text; let the probes re-read
        self.document.notify_layout(&self.dispatcher);
        Ok(Some(output))
    }

    /// Read commands until EOF or `quit`
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> Result<()> {
        writeln!(output, "{}", self.render())?;
        writeln!(output, "type `help` for commands")?;

        for line in input.lines() {
            let line = line.context("Failed to read command")?;
            if line.trim().is_empty() {
                continue;
            }
            let result = Command::parse(&line).and_then(|command| self.execute(command));
            match result {
                Ok(Some(text)) => writeln!(output, "{text}")?,
                Ok(None) => break,
                Err(err) => {
                    tracing::debug!(error = %err, "command rejected");
                    writeln!(output, "error: {err:#}")?;
                }
            }
        }
        Ok(())
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        self.state.unsubscribe(self.restyle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typescale_theme::{Breakpoint, RootStyleMirror};

    struct Discard;

    impl RootStyleMirror for Discard {
        fn set_property(&self, _name: &str, _value: &str) {}
    }

    fn measured(session: &Session<'_>, variant: Variant) -> f32 {
        session
            .measurements()
            .into_iter()
            .find(|(v, _)| *v == variant)
            .and_then(|(_, m)| m.px())
            .unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("set font IBM Plex Sans").unwrap(),
            Command::Font(FontPreset::IbmPlexSans)
        );
        assert_eq!(Command::parse("set ratio 1.25").unwrap(), Command::Ratio(1.25));
        assert_eq!(Command::parse("set xl off").unwrap(), Command::IncludeXl(false));
        assert_eq!(
            Command::parse("weight h2 700").unwrap(),
            Command::Weight(Variant::H2, 700)
        );
        assert_eq!(
            Command::parse("resize 959").unwrap(),
            Command::Resize { width: 959, height: 800 }
        );
        assert!(Command::parse("weight h9 700").is_err());
        assert!(Command::parse("set ratio lots").is_err());
        assert!(Command::parse("dance").is_err());
    }

    #[test]
    fn test_probes_follow_parameter_changes() {
        let state = PlaygroundState::with_mirror(Discard);
        let mut session = Session::new(&state, 1280);
        let before = measured(&session, Variant::H1);

        session.execute(Command::Ratio(1.5)).unwrap();
        let after = measured(&session, Variant::H1);
        assert!(after > before, "{after} <= {before}");

        let expected = state.snapshot().resolve_px(Variant::H1, 1280.0);
        assert!((after - expected).abs() <= 0.051);
    }

    #[test]
    fn test_resize_updates_breakpoint_and_measurements() {
        let state = PlaygroundState::with_mirror(Discard);
        let mut session = Session::new(&state, 1280);
        let wide = measured(&session, Variant::H1);

        let reply = session
            .execute(Command::Resize { width: 400, height: 800 })
            .unwrap()
            .unwrap();
        assert!(reply.contains("(xs)"));
        assert_eq!(session.viewport.breakpoint(), Breakpoint::Xs);
        assert!(measured(&session, Variant::H1) < wide);
    }

    #[test]
    fn test_dropped_session_releases_its_document() {
        let state = PlaygroundState::with_mirror(Discard);
        let session = Session::new(&state, 1280);
        let document = Arc::downgrade(&session.document);
        assert_eq!(state.subscriber_count(), 1);

        drop(session);
        assert_eq!(state.subscriber_count(), 0);
        assert!(document.upgrade().is_none());
        state.set_factor(3.0).unwrap();
    }

    #[test]
    fn test_render_shows_sample_text_and_notes() {
        let state = PlaygroundState::with_mirror(Discard);
        let session = Session::new(&state, 1280);
        let text = session.render();

        assert!(text.contains(report::SAMPLE_TEXT));
        assert!(text.ends_with(report::NOTES));
        assert!(text.contains("xl: on"));
    }

    #[test]
    fn test_run_reports_errors_and_stops_on_quit() {
        let state = PlaygroundState::with_mirror(Discard);
        let mut session = Session::new(&state, 1280);
        let input = b"set base 13\nset factor 4\nquit\nset factor 6\n";
        let mut output = Vec::new();
        session.run(&input[..], &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("error: base font size 13px"));
        assert!(text.contains("factor = 4"));
        assert!(!text.contains("factor = 6"));
        assert_eq!(state.responsive_config().factor, 4.0);
    }
}
