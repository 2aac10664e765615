use super::*;

impl AppState {
    /// Starts `request` under a fresh generation. Results of older
    /// generations are dropped when they arrive.
    pub(crate) fn start_request(&mut self, tx: &mpsc::Sender<AppEvent>, request: FetchRequest) {
        self.request_generation = self.request_generation.wrapping_add(1);
        let generation = self.request_generation;
        info!("weather request {generation} started: {request:?}");

        self.last_request = Some(request.clone());
        self.error = None;
        self.mode = AppMode::Loading;
        self.loading_message = LOADING_MESSAGE.to_string();

        let weather = self.weather_client.clone();
        let geolocator = self.geolocator.clone();
        let tx2 = tx.clone();
        tokio::spawn(async move {
            let event = match request.perform(&weather, &geolocator).await {
                Ok(record) => AppEvent::FetchSucceeded {
                    generation,
                    record: Box::new(record),
                },
                Err(error) => AppEvent::FetchFailed { generation, error },
            };
            let _ = tx2.send(event).await;
        });
    }
}
