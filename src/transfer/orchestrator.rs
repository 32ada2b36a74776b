//! Batch driver over the configured image list

use super::outcome::TransferOutcome;
use super::reference::target_reference;
use super::retry::RetryPolicy;
use super::stage::TransferStageMachine;
use crate::logging::Logger;
use crate::runtime::ContainerRuntime;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Run-level switches, passed in explicitly instead of read from globals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferOptions {
    /// Compute target references only; never touch the runtime
    pub dry_run: bool,
    /// Images in flight at once. 1 means strictly sequential.
    pub concurrency: usize,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            concurrency: 1,
        }
    }
}

pub struct TransferOrchestrator {
    runtime: Arc<dyn ContainerRuntime>,
    retry: RetryPolicy,
    options: TransferOptions,
    logger: Logger,
}

impl TransferOrchestrator {
    pub fn new(
        runtime: Arc<dyn ContainerRuntime>,
        retry: RetryPolicy,
        options: TransferOptions,
        logger: Logger,
    ) -> Self {
        Self {
            runtime,
            retry,
            options,
            logger,
        }
    }

    /// Transfer every image into `target`, returning one outcome per image in
    /// configured order. A failing image never stops the rest of the batch.
    ///
    /// Images that map to the same target reference share one local tag in
    /// the runtime, so they are transferred one after another even when
    /// several images are in flight.
    pub async fn run(&self, images: &[String], target: &str) -> Vec<TransferOutcome> {
        if self.options.dry_run {
            return self.preview(images, target);
        }

        let concurrency = self.options.concurrency.max(1);
        let locks: HashMap<String, Mutex<()>> = images
            .iter()
            .map(|image| (target_reference(image, target), Mutex::new(())))
            .collect();
        let locks = &locks;

        // buffered() yields in input order regardless of completion order
        stream::iter(images)
            .map(move |image| async move {
                let target_ref = target_reference(image, target);
                self.announce(image, &target_ref);

                let logger = if concurrency > 1 {
                    self.logger.scoped(image)
                } else {
                    self.logger.clone()
                };
                let machine = TransferStageMachine::new(self.runtime.as_ref(), &self.retry, &logger);
                let _guard = locks[&target_ref].lock().await;
                machine.transfer(image, target).await
            })
            .buffered(concurrency)
            .collect::<Vec<_>>()
            .await
    }

    fn preview(&self, images: &[String], target: &str) -> Vec<TransferOutcome> {
        self.logger
            .info("DRY RUN MODE - No actual changes will be made");
        images
            .iter()
            .map(|image| {
                let target_ref = target_reference(image, target);
                self.announce(image, &target_ref);
                TransferOutcome::succeeded(image.as_str(), target_ref)
            })
            .collect()
    }

    fn announce(&self, source: &str, target_ref: &str) {
        if self.logger.verbose {
            self.logger
                .info(&format!("Processing image {} in detail:", source));
            self.logger.detail(&format!("Source: {}", source));
            self.logger.detail(&format!("Target: {}", target_ref));
        } else {
            self.logger.info(&format!("Processing image: {}", source));
        }
    }
}
