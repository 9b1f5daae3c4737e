//! One-shot catalog loads.
//!
//! A page's `mount` hands the host a [`LoadTask`] to spawn. The task sends
//! its result through a [`LoadSender`], and the page drains the matching
//! [`LoadReceiver`] once per frame. Dropping the receiver on unmount is all
//! it takes to make late results vanish.

use bitflags::bitflags;
use exosky_client::{
    ApiClient,
    AssetClient,
};
use futures::future::LocalBoxFuture;
use tokio::sync::mpsc;

use crate::app::config::Urls;

pub type LoadTask = LocalBoxFuture<'static, ()>;

#[derive(Clone, Debug)]
pub struct Clients {
    pub api: ApiClient,
    pub assets: AssetClient,
}

impl Clients {
    pub fn new(urls: &Urls) -> Self {
        Self {
            api: ApiClient::new(urls.api_url.clone()),
            assets: AssetClient::new(urls.asset_url.clone()),
        }
    }
}

bitflags! {
    /// Event sources a mounted page listens to.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Listeners: u8 {
        const POINTER = 0b001;
        const WHEEL = 0b010;
        const RESIZE = 0b100;
    }
}

pub fn load_channel<T>() -> (LoadSender<T>, LoadReceiver<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (LoadSender { tx }, LoadReceiver { rx })
}

#[derive(Debug)]
pub struct LoadSender<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> Clone for LoadSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> LoadSender<T> {
    /// Returns whether the page was still there to receive it.
    pub fn deliver(&self, value: T) -> bool {
        if self.tx.send(value).is_err() {
            tracing::debug!("page unmounted before load finished. discarding result");
            false
        }
        else {
            true
        }
    }
}

#[derive(Debug)]
pub struct LoadReceiver<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T> LoadReceiver<T> {
    pub fn try_next(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    pub fn drain(&mut self) -> Vec<T> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}
