//! Composition root and control loop.
//!
//! All controller and observable mutation happens inside [`event_loop`]. The
//! stdin reader thread and the debounce timer only post [`AppEvent`]s into
//! its channel.

use std::{io::Write, thread};

use anyhow::{Context, Result};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, info};
use weather_core::{
    AccuWeatherSource, Config, Debouncer, Scheduler, SearchAndWeatherController, TokioScheduler,
    WeatherSource,
};

use crate::view::{Command, TerminalView, parse_line};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Input(Command),
    QueryCommitted(String),
}

/// Builds every component once and runs until the user exits.
pub async fn run(config: Config) -> Result<()> {
    let source = AccuWeatherSource::from_config(&config)?;
    let mut controller = SearchAndWeatherController::new(source);

    let mut view = TerminalView::new(std::io::stdout());
    view.bind(&mut controller);
    view.banner()?;

    let (tx, mut rx) = unbounded_channel();
    let scheduler = TokioScheduler::current().context("Debounce timer needs a tokio runtime")?;
    let mut debouncer = committing_debouncer(scheduler, config.debounce(), tx.clone());

    spawn_stdin_reader(tx);

    event_loop(&mut controller, &mut view, &mut debouncer, &mut rx).await
}

/// Debouncer whose dispatch posts `QueryCommitted` into the control loop.
pub fn committing_debouncer<Sch: Scheduler>(
    scheduler: Sch,
    delay: std::time::Duration,
    tx: UnboundedSender<AppEvent>,
) -> Debouncer<String, Sch> {
    Debouncer::new(scheduler, delay, move |query| {
        let _ = tx.send(AppEvent::QueryCommitted(query));
    })
}

/// Blocking reads stay off the runtime so shutdown never waits on stdin.
fn spawn_stdin_reader(tx: UnboundedSender<AppEvent>) {
    thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if tx.send(AppEvent::Input(parse_line(&line))).is_err() {
                return;
            }
        }
        let _ = tx.send(AppEvent::Input(Command::Exit));
    });
}

pub async fn event_loop<S, W, Sch>(
    controller: &mut SearchAndWeatherController<S>,
    view: &mut TerminalView<W>,
    debouncer: &mut Debouncer<String, Sch>,
    rx: &mut UnboundedReceiver<AppEvent>,
) -> Result<()>
where
    S: WeatherSource,
    W: Write + 'static,
    Sch: Scheduler,
{
    while let Some(event) = rx.recv().await {
        debug!(?event, "event");
        match event {
            AppEvent::Input(Command::Text(text)) => debouncer.schedule(text),
            AppEvent::QueryCommitted(query) => {
                controller.snapshot_mut().place.set(query);
                match controller.update_places().await {
                    Ok(labels) => view.show_places(labels)?,
                    Err(err) => {
                        view.hide_places();
                        view.show_error(&err)?;
                    }
                }
            }
            AppEvent::Input(Command::Pick(n)) => {
                let Some(label) = view.candidate(n).map(str::to_owned) else {
                    view.show_error(&format!("no place numbered {n}"))?;
                    continue;
                };
                view.hide_places();
                match controller.update_all(&label).await {
                    Ok(()) => view.show_updated()?,
                    Err(err) => view.show_error(&err)?,
                }
            }
            AppEvent::Input(Command::Clear) => view.clear()?,
            AppEvent::Input(Command::Help) => view.help()?,
            AppEvent::Input(Command::Unknown(raw)) => {
                view.show_error(&format!("unknown command '{raw}'"))?
            }
            AppEvent::Input(Command::Exit) => break,
        }
    }

    debouncer.cancel();
    info!("exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };
    use weather_core::{DEFAULT_DEBOUNCE, Endpoint, SourceError};

    #[derive(Debug, Default)]
    struct FakeSource {
        calls: Arc<Mutex<Vec<(String, String)>>>,
    }

    #[async_trait]
    impl WeatherSource for FakeSource {
        async fn fetch(&self, template: &str, subject: &str) -> Result<Value, SourceError> {
            self.calls.lock().unwrap().push((template.to_string(), subject.to_string()));
            let body = match template {
                t if t == Endpoint::Autocomplete.template() => json!([{
                    "LocalizedName": subject,
                    "Country": { "LocalizedName": "France" },
                    "AdministrativeArea": { "LocalizedName": "Ile-de-France" },
                    "Key": "623"
                }]),
                t if t == Endpoint::CurrentConditions.template() => json!([{
                    "WeatherText": "Sunny", "Temperature": { "Metric": { "Value": 22.5 } }
                }]),
                t if t == Endpoint::DailyForecast.template() => json!({ "DailyForecasts": [] }),
                t if t == Endpoint::UvIndex.template() => json!([{ "Category": "Low" }]),
                _ => json!([]),
            };
            Ok(body)
        }
    }

    fn harness() -> (
        SearchAndWeatherController<FakeSource>,
        TerminalView<Vec<u8>>,
        UnboundedSender<AppEvent>,
        UnboundedReceiver<AppEvent>,
    ) {
        let mut controller = SearchAndWeatherController::new(FakeSource::default());
        let view = TerminalView::new(Vec::new());
        view.bind(&mut controller);
        let (tx, rx) = unbounded_channel();
        (controller, view, tx, rx)
    }

    fn input(tx: &UnboundedSender<AppEvent>, line: &str) {
        tx.send(AppEvent::Input(parse_line(line))).unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn typed_burst_searches_once_then_pick_loads_weather() {
        let (mut controller, mut view, tx, mut rx) = harness();
        let mut debouncer =
            committing_debouncer(TokioScheduler::current().unwrap(), DEFAULT_DEBOUNCE, tx.clone());

        let driver = async {
            input(&tx, "Par");
            input(&tx, "Paris");
            tokio::time::sleep(Duration::from_millis(400)).await;
            input(&tx, ":1");
            input(&tx, ":exit");
        };
        let (result, ()) = tokio::join!(
            event_loop(&mut controller, &mut view, &mut debouncer, &mut rx),
            driver
        );
        result.unwrap();

        let calls = controller.source().calls.lock().unwrap().clone();
        assert_eq!(calls[0], (Endpoint::Autocomplete.template().to_string(), "Paris".to_string()));
        assert_eq!(calls.len(), 6);
        assert!(calls[1..].iter().all(|(_, subject)| subject == "623"));

        assert_eq!(controller.snapshot().place.get(), "Paris");
        assert_eq!(controller.snapshot().uv.get(), "UV Index: Low");

        let out = view.contents();
        assert!(out.contains(":1  Paris, France, Ile-de-France"));
        assert!(out.contains("Weather: Sunny\nTemperature: 22.5°C"));
        assert!(out.contains("Updated at "));
        assert_eq!(view.candidate(1), None);
    }

    #[tokio::test(start_paused = true)]
    async fn exit_before_quiet_period_drops_pending_search() {
        let (mut controller, mut view, tx, mut rx) = harness();
        let mut debouncer =
            committing_debouncer(TokioScheduler::current().unwrap(), DEFAULT_DEBOUNCE, tx.clone());

        input(&tx, "Paris");
        input(&tx, ":exit");
        event_loop(&mut controller, &mut view, &mut debouncer, &mut rx).await.unwrap();
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert!(!debouncer.is_pending());
        assert!(controller.source().calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn pick_without_list_reports_error() {
        let (mut controller, mut view, tx, mut rx) = harness();
        let mut debouncer =
            committing_debouncer(TokioScheduler::current().unwrap(), DEFAULT_DEBOUNCE, tx.clone());

        input(&tx, ":3");
        input(&tx, ":bogus");
        input(&tx, ":exit");
        event_loop(&mut controller, &mut view, &mut debouncer, &mut rx).await.unwrap();

        let out = view.contents();
        assert!(out.contains("Error: no place numbered 3"));
        assert!(out.contains("Error: unknown command ':bogus'"));
        assert!(controller.source().calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_commit_hides_list_without_network() {
        let (mut controller, mut view, tx, mut rx) = harness();
        let mut debouncer =
            committing_debouncer(TokioScheduler::current().unwrap(), DEFAULT_DEBOUNCE, tx.clone());
        view.show_places(vec!["Old, Place, Here".into()]).unwrap();

        tx.send(AppEvent::QueryCommitted("   ".into())).unwrap();
        input(&tx, ":exit");
        event_loop(&mut controller, &mut view, &mut debouncer, &mut rx).await.unwrap();

        assert_eq!(view.candidate(1), None);
        assert!(controller.source().calls.lock().unwrap().is_empty());
    }
}
