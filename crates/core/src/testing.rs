//! Test doubles shared by the unit tests.

use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, HashSet},
    io::{Read, Write},
    net::{TcpListener, TcpStream},
    path::{Path, PathBuf},
    thread::{self, JoinHandle},
    time::Duration,
};

use anyhow::{bail, Result};

use crate::{
    download::{AssetRequest, AssetSink},
    igdb::{IgdbError, MetadataSource},
    models::{Cover, Game, Genre, Id, Platform, ReleaseDate, Screenshot},
};

/// Serve a single HTTP response on a random local port.
///
/// The join handle yields the raw request text.
pub fn serve_once(status: &'static str, body: Vec<u8>) -> Result<(String, JoinHandle<String>)> {
    serve_after(Duration::ZERO, status, body)
}

/// Like [`serve_once`], but holds the response back for `delay` after the
/// request has been read.
pub fn serve_after(
    delay: Duration,
    status: &'static str,
    body: Vec<u8>,
) -> Result<(String, JoinHandle<String>)> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept failed");
        let request = read_request(&mut stream);
        thread::sleep(delay);
        let head = format!(
            "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        stream.write_all(head.as_bytes()).expect("write failed");
        stream.write_all(&body).expect("write failed");
        stream.flush().expect("flush failed");
        request
    });
    Ok((format!("http://{addr}"), handle))
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];
    let mut expected = None;
    loop {
        if let Some(total) = expected {
            if buffer.len() >= total {
                break;
            }
        }
        let read = stream.read(&mut chunk).expect("read failed");
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);
        if expected.is_none() {
            if let Some(end) = buffer.windows(4).position(|window| window == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buffer[..end]).to_lowercase();
                let length = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|value| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                expected = Some(end + 4 + length);
            }
        }
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// In-memory metadata service.
#[derive(Default)]
pub struct FakeSource {
    pub games: Vec<Game>,
    pub platforms: HashMap<Id, Platform>,
    pub genres: HashMap<Id, Genre>,
    pub release_dates: HashMap<Id, ReleaseDate>,
    pub covers: HashMap<Id, Cover>,
    pub screenshots: HashMap<Id, Screenshot>,
    pub failing_listings: HashSet<Id>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeSource {
    pub fn with_platform(mut self, id: Id, name: &str) -> Self {
        self.platforms.insert(
            id,
            Platform {
                id,
                name: name.to_string(),
            },
        );
        self
    }

    pub fn with_genre(mut self, id: Id, name: &str) -> Self {
        self.genres.insert(
            id,
            Genre {
                id,
                name: name.to_string(),
            },
        );
        self
    }

    pub fn with_release(mut self, id: Id, platform: Id, region: i64, human: &str) -> Self {
        self.release_dates.insert(
            id,
            ReleaseDate {
                id,
                human: Some(human.to_string()),
                platform: Some(platform),
                region: Some(region),
                date: None,
            },
        );
        self
    }

    pub fn with_cover(mut self, id: Id, image_id: &str) -> Self {
        self.covers.insert(
            id,
            Cover {
                id,
                image_id: image_id.to_string(),
            },
        );
        self
    }

    pub fn with_screenshot(mut self, id: Id, image_id: &str) -> Self {
        self.screenshots.insert(
            id,
            Screenshot {
                id,
                image_id: image_id.to_string(),
            },
        );
        self
    }

    pub fn with_game(mut self, game: Game) -> Self {
        self.games.push(game);
        self
    }

    /// Make the screenshot listing fail for any request containing `id`.
    pub fn with_failing_listing(mut self, id: Id) -> Self {
        self.failing_listings.insert(id);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn lookup<T: Clone>(
        map: &HashMap<Id, T>,
        endpoint: &'static str,
        id: Id,
    ) -> Result<T, IgdbError> {
        map.get(&id)
            .cloned()
            .ok_or(IgdbError::NotFound { endpoint, id })
    }
}

impl MetadataSource for FakeSource {
    fn search_games(&self, name: &str) -> Result<Vec<Game>, IgdbError> {
        self.record(format!("search {name}"));
        Ok(self.games.clone())
    }

    fn platform(&self, id: Id) -> Result<Platform, IgdbError> {
        self.record(format!("platform {id}"));
        Self::lookup(&self.platforms, "platforms", id)
    }

    fn genre(&self, id: Id) -> Result<Genre, IgdbError> {
        self.record(format!("genre {id}"));
        Self::lookup(&self.genres, "genres", id)
    }

    fn release_date(&self, id: Id) -> Result<ReleaseDate, IgdbError> {
        self.record(format!("release_date {id}"));
        Self::lookup(&self.release_dates, "release_dates", id)
    }

    fn cover(&self, id: Id) -> Result<Cover, IgdbError> {
        self.record(format!("cover {id}"));
        Self::lookup(&self.covers, "covers", id)
    }

    fn screenshots(&self, ids: &[Id]) -> Result<Vec<Screenshot>, IgdbError> {
        self.record(format!("screenshots {ids:?}"));
        if ids.iter().any(|id| self.failing_listings.contains(id)) {
            return Err(IgdbError::Status {
                endpoint: "screenshots",
                status: 500,
                body: "listing unavailable".to_string(),
            });
        }
        Ok(ids
            .iter()
            .filter_map(|id| self.screenshots.get(id).cloned())
            .collect())
    }

    fn screenshot(&self, id: Id) -> Result<Screenshot, IgdbError> {
        self.record(format!("screenshot {id}"));
        Self::lookup(&self.screenshots, "screenshots", id)
    }

    fn image_url(&self, image_id: &str) -> String {
        format!("https://images.test/t_1080p/{image_id}.jpg")
    }
}

/// Asset sink that writes the request URL as the file content.
#[derive(Default)]
pub struct UrlSink;

impl AssetSink for UrlSink {
    fn fetch(&self, directory: &Path, request: &AssetRequest) -> Result<PathBuf> {
        let path = directory.join(request.file_name());
        std::fs::write(&path, request.url.as_bytes())?;
        Ok(path)
    }
}

/// Asset sink that behaves like [`UrlSink`] until its `fail_at`-th fetch
/// (zero based), which fails without writing anything.
pub struct FailingSink {
    fail_at: usize,
    fetches: Cell<usize>,
}

impl FailingSink {
    /// Sink failing on fetch number `fail_at`.
    pub fn new(fail_at: usize) -> Self {
        Self {
            fail_at,
            fetches: Cell::new(0),
        }
    }
}

impl AssetSink for FailingSink {
    fn fetch(&self, directory: &Path, request: &AssetRequest) -> Result<PathBuf> {
        let fetch = self.fetches.get();
        self.fetches.set(fetch + 1);
        if fetch == self.fail_at {
            bail!("download of {} failed", request.url);
        }
        UrlSink.fetch(directory, request)
    }
}
