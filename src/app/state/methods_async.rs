use super::*;

const ROTATE_STEP: f32 = 0.1;
const ZOOM_STEP: f32 = 0.5;
const MAX_LOCATION_LEN: usize = 64;

impl AppState {
    pub async fn handle_event(
        &mut self,
        event: AppEvent,
        tx: &mpsc::Sender<AppEvent>,
        cli: &Cli,
    ) -> Result<()> {
        match event {
            AppEvent::Bootstrap => self.handle_bootstrap(tx, cli)?,
            AppEvent::TickFrame => self.handle_tick_frame(),
            AppEvent::Input(input) => self.handle_input(input, tx).await?,
            AppEvent::FetchSucceeded { generation, record } => {
                self.handle_fetch_succeeded(generation, *record);
            }
            AppEvent::FetchFailed { generation, error } => {
                self.handle_fetch_failed(generation, error);
            }
            AppEvent::Quit => self.mode = AppMode::Quit,
        }

        Ok(())
    }

    pub(crate) fn handle_bootstrap(&mut self, tx: &mpsc::Sender<AppEvent>, cli: &Cli) -> Result<()> {
        cli.validate()?;
        let fps = if cli.reduced_motion {
            cli.fps.min(20)
        } else {
            cli.fps
        };
        start_frame_task(tx.clone(), fps);
        let request = cli
            .startup_query()
            .map_or(FetchRequest::CurrentLocation, FetchRequest::Named);
        self.start_request(tx, request);
        Ok(())
    }

    pub(crate) fn handle_tick_frame(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_at);
        self.last_frame_at = now;
        self.frame_tick = self.frame_tick.saturating_add(1);

        let layers = self.scene.effect.map(WeatherEffect::layers);
        let wind_mph = self
            .effective_record()
            .map_or(0.0, |record| record.current.wind_mph);
        self.particles
            .update(layers.and_then(|l| l.precipitation), wind_mph, delta);
        self.lightning
            .update(layers.is_some_and(|l| l.lightning), delta);
    }

    pub(crate) fn handle_fetch_succeeded(&mut self, generation: u64, record: WeatherRecord) {
        if self.is_stale(generation) {
            return;
        }
        info!(
            "weather loaded for {} ({})",
            record.location.display_name(),
            record.current.condition.text
        );
        if let Some(day) = self.portal.exit().exited {
            info!("portal to forecast day {day} closed by new weather");
        }
        self.weather = Some(record);
        self.mode = AppMode::Ready;
        self.error = None;
        self.particles.reset();
        self.recompute_scene();
    }

    pub(crate) fn handle_fetch_failed(&mut self, generation: u64, error: AppError) {
        if self.is_stale(generation) {
            return;
        }
        warn!("weather request {generation} failed: {error}");
        if let Some(day) = self.portal.exit().exited {
            info!("portal to forecast day {day} closed by failed request");
            self.recompute_scene();
        }
        let retry = self
            .last_request
            .clone()
            .unwrap_or(FetchRequest::CurrentLocation);
        self.error = Some(ErrorScreen {
            message: retry.failure_message().to_string(),
            cause: error,
            retry,
        });
        self.mode = AppMode::Error;
    }

    fn is_stale(&self, generation: u64) -> bool {
        if generation == self.request_generation {
            return false;
        }
        debug!(
            "dropping result of request {generation}; request {} is newer",
            self.request_generation
        );
        true
    }

    pub(crate) async fn handle_input(
        &mut self,
        event: Event,
        tx: &mpsc::Sender<AppEvent>,
    ) -> Result<()> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.handle_key_press(key, tx).await?;
            }
            Event::Resize(_, _) => self.particles.reset(),
            _ => {}
        }

        Ok(())
    }

    pub(crate) async fn handle_key_press(
        &mut self,
        key: KeyEvent,
        tx: &mpsc::Sender<AppEvent>,
    ) -> Result<()> {
        if matches!(key.code, KeyCode::Char('c' | 'C'))
            && key.modifiers.contains(KeyModifiers::CONTROL)
        {
            tx.send(AppEvent::Quit).await?;
            return Ok(());
        }
        if self.location_input.is_some() {
            self.handle_location_input_key(key, tx);
            return Ok(());
        }
        if self.handle_navigation_key(key.code, tx).await? {
            return Ok(());
        }
        if self.handle_camera_key(key.code) {
            return Ok(());
        }
        let Some(command) = command_char(key).and_then(command_from_char) else {
            return Ok(());
        };
        self.execute_key_command(command, tx).await
    }

    async fn handle_navigation_key(
        &mut self,
        code: KeyCode,
        tx: &mpsc::Sender<AppEvent>,
    ) -> Result<bool> {
        match code {
            KeyCode::Esc if self.portal.is_active() && self.mode != AppMode::Error => {
                self.exit_portal();
                Ok(true)
            }
            KeyCode::Esc => {
                tx.send(AppEvent::Quit).await?;
                Ok(true)
            }
            KeyCode::Enter if self.mode == AppMode::Error => {
                self.retry(tx);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn handle_camera_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Left => self.camera.rotate(-ROTATE_STEP, 0.0),
            KeyCode::Right => self.camera.rotate(ROTATE_STEP, 0.0),
            KeyCode::Up => self.camera.rotate(0.0, -ROTATE_STEP),
            KeyCode::Down => self.camera.rotate(0.0, ROTATE_STEP),
            KeyCode::Home => self.camera.reset(),
            _ => return false,
        }
        true
    }

    fn handle_location_input_key(&mut self, key: KeyEvent, tx: &mpsc::Sender<AppEvent>) {
        let Some(buffer) = self.location_input.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.location_input = None,
            KeyCode::Enter => {
                let query = buffer.trim().to_string();
                if query.is_empty() {
                    return;
                }
                self.location_input = None;
                self.start_request(tx, FetchRequest::Named(query));
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(ch)
                if is_location_char(ch) && buffer.chars().count() < MAX_LOCATION_LEN =>
            {
                buffer.push(ch);
            }
            _ => {}
        }
    }

    async fn execute_key_command(
        &mut self,
        command: KeyCommand,
        tx: &mpsc::Sender<AppEvent>,
    ) -> Result<()> {
        match command {
            KeyCommand::Quit => tx.send(AppEvent::Quit).await?,
            KeyCommand::OpenLocationInput => self.location_input = Some(String::new()),
            KeyCommand::Refresh => self.refresh_or_retry(tx),
            KeyCommand::SetFahrenheit => self.units = Units::Fahrenheit,
            KeyCommand::SetCelsius => self.units = Units::Celsius,
            KeyCommand::EnterPortal(day_index) => self.enter_portal(day_index),
            KeyCommand::ExitPortal => self.exit_portal(),
            KeyCommand::ZoomIn => self.camera.zoom(-ZOOM_STEP),
            KeyCommand::ZoomOut => self.camera.zoom(ZOOM_STEP),
        }
        Ok(())
    }

    pub(crate) fn refresh_or_retry(&mut self, tx: &mpsc::Sender<AppEvent>) {
        match self.mode {
            AppMode::Error => self.retry(tx),
            AppMode::Ready => {
                let request = self
                    .last_request
                    .clone()
                    .unwrap_or(FetchRequest::CurrentLocation);
                self.start_request(tx, request);
            }
            AppMode::Loading | AppMode::Quit => {}
        }
    }

    /// Re-runs exactly the request that produced the current error.
    pub(crate) fn retry(&mut self, tx: &mpsc::Sender<AppEvent>) {
        if let Some(screen) = self.error.take() {
            info!("retrying after: {}", screen.cause);
            self.start_request(tx, screen.retry);
        }
    }

    pub(crate) fn enter_portal(&mut self, day_index: usize) {
        if self.mode != AppMode::Ready {
            return;
        }
        let Some(main) = self.weather.as_ref() else {
            return;
        };
        match self.portal.enter(main, day_index) {
            Ok(transition) => {
                if let Some(exited) = transition.exited {
                    info!("portal to forecast day {exited} closed");
                }
                info!("portal to forecast day {day_index} opened");
                self.particles.reset();
                self.recompute_scene();
            }
            Err(err) => debug!("portal not opened: {err}"),
        }
    }

    pub(crate) fn exit_portal(&mut self) {
        if let Some(day) = self.portal.exit().exited {
            info!("portal to forecast day {day} closed");
            self.particles.reset();
            self.recompute_scene();
        }
    }
}
