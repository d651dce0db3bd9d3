#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::Mutex;

use rocket::http::{Cookie, CookieJar, SameSite};
use rocket::time::Duration;

/// Persistent per-visitor key/value storage.
pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
}

/// Storage backed by plain (unsigned) cookies, so the value stays readable
/// by stylesheets and scripts on the page.
pub struct CookieStorage<'a, 'r> {
    jar: &'a CookieJar<'r>,
    max_age_days: i64,
}

impl<'a, 'r> CookieStorage<'a, 'r> {
    pub fn new(jar: &'a CookieJar<'r>, max_age_days: i64) -> Self {
        CookieStorage { jar, max_age_days }
    }
}

impl Storage for CookieStorage<'_, '_> {
    fn get_item(&self, key: &str) -> Option<String> {
        self.jar.get(key).map(|c| c.value().to_string())
    }

    fn set_item(&self, key: &str, value: &str) {
        let mut cookie = Cookie::new(key.to_string(), value.to_string());
        cookie.set_path("/");
        cookie.set_same_site(SameSite::Lax);
        cookie.set_max_age(Duration::days(self.max_age_days));
        self.jar.add(cookie);
    }
}

/// In-memory storage with a write log.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<(String, String)>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = MemoryStorage::default();
        if let Ok(mut items) = storage.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
        storage
    }

    /// Every `set_item` call so far, in order.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
        if let Ok(mut writes) = self.writes.lock() {
            writes.push((key.to_string(), value.to_string()));
        }
    }
}
