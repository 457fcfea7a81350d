//! Match-server reflector
//!
//! Plays a game hosted on a remote match server with a bot reachable over
//! HTTP. Each turn the reflector polls `/get` until one of the seats it holds
//! a key for is to move, posts the game JSON to the bot (with the board also in
//! a `board` query parameter, as the match server itself does) and forwards the
//! bot's reply to `/move`.

use std::fmt;
use std::time::{Duration, Instant};

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::board::{Piece, Player};
use crate::error::ReflectError;
use crate::protocol::WireBoard;

pub const DEFAULT_MATCH_SERVER: &str = "https://step-reversi.appspot.com";
pub const DEFAULT_BOT: &str = "http://localhost:8080";

/// Upper bound on relayed moves, so a confused server cannot loop us forever
pub const MAX_TURNS: usize = 150;
pub const STALL_TIMEOUT: Duration = Duration::from_secs(60 * 60);
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Parse an absolute URL, keeping the text in the error.
pub fn parse_url(text: &str) -> Result<Url, ReflectError> {
    Url::parse(text).map_err(|e| ReflectError::InvalidUrl {
        url: text.to_string(),
        reason: e.to_string(),
    })
}

/// Where the game lives, which seats we play and how patient to be.
#[derive(Debug, Clone)]
pub struct ReflectorConfig {
    /// Match server base; only scheme, host and port are used
    pub server: Url,
    /// Bot to ask for moves
    pub bot: Url,
    pub game_key: String,
    pub white_key: Option<String>,
    pub black_key: Option<String>,
    pub max_turns: usize,
    /// Give up when the opponent has not moved for this long
    pub stall_timeout: Duration,
    pub poll_interval: Duration,
}

impl ReflectorConfig {
    pub fn new(server: Url, bot: Url) -> Self {
        Self {
            server,
            bot,
            game_key: String::new(),
            white_key: None,
            black_key: None,
            max_turns: MAX_TURNS,
            stall_timeout: STALL_TIMEOUT,
            poll_interval: POLL_INTERVAL,
        }
    }

    /// Take the server and keys from a game viewer URL such as
    /// `https://host/view?gamekey=foo&whitekey=bar`.
    pub fn apply_view_url(&mut self, view: &str) -> Result<(), ReflectError> {
        let mut url = parse_url(view)?;
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        for (key, value) in pairs {
            match key.as_str() {
                "gamekey" => self.game_key = value,
                "whitekey" => self.white_key = Some(value),
                "blackkey" => self.black_key = Some(value),
                "bot" => self.bot = parse_url(&value)?,
                _ => debug!(key = %key, "ignoring viewer url parameter"),
            }
        }
        url.set_path("");
        url.set_query(None);
        url.set_fragment(None);
        self.server = url;
        Ok(())
    }

    /// A game key and at least one seat are required.
    pub fn validate(&self) -> Result<(), ReflectError> {
        let seated = self.white_key.is_some() || self.black_key.is_some();
        if self.game_key.is_empty() || !seated {
            return Err(ReflectError::MissingKeys);
        }
        Ok(())
    }

    /// Whether the side coded `next` (1 Black, 2 White) is one of ours
    pub fn plays(&self, next: i64) -> Result<bool, ReflectError> {
        match Piece::from_code(next).and_then(Piece::owner) {
            Some(Player::Black) => Ok(self.black_key.is_some()),
            Some(Player::White) => Ok(self.white_key.is_some()),
            None => Err(ReflectError::InvalidTurn(next)),
        }
    }

    /// Match-server endpoint carrying the game and player keys
    pub fn game_url(&self, path: &str, extra: Option<(&str, &str)>) -> Url {
        let mut url = self.server.clone();
        url.set_path(path);
        {
            let mut query = url.query_pairs_mut();
            query.clear();
            query.append_pair("gamekey", &self.game_key);
            if let Some(key) = &self.white_key {
                query.append_pair("whitekey", key);
            }
            if let Some(key) = &self.black_key {
                query.append_pair("blackkey", key);
            }
            if let Some((name, value)) = extra {
                query.append_pair(name, value);
            }
        }
        url
    }

    /// Bot URL with `board` set to the board JSON, replacing any earlier value
    pub fn bot_url(&self, board: &WireBoard) -> Result<Url, ReflectError> {
        let board = serde_json::to_string(board)?;
        let mut url = self.bot.clone();
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .into_owned()
            .filter(|(name, _)| name != "board")
            .collect();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair("board", &board);
        Ok(url)
    }
}

/// The part of the match server's game JSON the reflector reads.
/// Both capitalised and lower-case keys occur in the wild.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchGame {
    #[serde(alias = "Winner", default)]
    pub winner: i64,
    #[serde(alias = "Board")]
    pub board: WireBoard,
}

impl MatchGame {
    /// `None` while the game is still running
    pub fn result(&self) -> Result<Option<ReflectOutcome>, ReflectError> {
        match self.winner {
            0 => Ok(None),
            1 => Ok(Some(ReflectOutcome::Won(Player::Black))),
            2 => Ok(Some(ReflectOutcome::Won(Player::White))),
            3 => Ok(Some(ReflectOutcome::Tie)),
            other => Err(ReflectError::InvalidWinner(other)),
        }
    }
}

/// How a reflected game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflectOutcome {
    Won(Player),
    Tie,
    /// Stopped after [`ReflectorConfig::max_turns`] relayed moves
    TurnLimit,
}

impl fmt::Display for ReflectOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReflectOutcome::Won(player) => write!(f, "game is over: {} won", player.name()),
            ReflectOutcome::Tie => write!(f, "game is over: tie"),
            ReflectOutcome::TurnLimit => write!(f, "stopped at the turn limit"),
        }
    }
}

enum Poll {
    Ours { raw: String, game: MatchGame },
    Over(ReflectOutcome),
}

/// Relays one game between the match server and a bot.
pub struct Reflector {
    config: ReflectorConfig,
    client: Client,
}

impl Reflector {
    pub fn new(config: ReflectorConfig) -> Result<Self, ReflectError> {
        config.validate()?;
        Ok(Self {
            config,
            client: Client::new(),
        })
    }

    pub fn config(&self) -> &ReflectorConfig {
        &self.config
    }

    /// Play until the game ends, a request fails or the turn limit is hit.
    pub async fn run(&self) -> Result<ReflectOutcome, ReflectError> {
        let viewer = self.config.game_url("/get", None);

        for turn in 0..self.config.max_turns {
            let (raw, game) = match self.wait_for_turn(&viewer).await? {
                Poll::Ours { raw, game } => (raw, game),
                Poll::Over(outcome) => {
                    info!(%outcome, turns = turn, "match finished");
                    return Ok(outcome);
                }
            };

            let reply = self.ask_bot(&raw, &game.board).await?;
            info!(turn, reply = %reply, "forwarding move");
            self.send_move(&reply).await?;
        }

        warn!(max_turns = self.config.max_turns, "turn limit reached");
        Ok(ReflectOutcome::TurnLimit)
    }

    async fn wait_for_turn(&self, viewer: &Url) -> Result<Poll, ReflectError> {
        let started = Instant::now();
        loop {
            let (raw, game) = self.fetch_game(viewer).await?;
            if let Some(outcome) = game.result()? {
                return Ok(Poll::Over(outcome));
            }
            if self.config.plays(game.board.next)? {
                return Ok(Poll::Ours { raw, game });
            }
            if started.elapsed() > self.config.stall_timeout {
                return Err(ReflectError::Stalled(self.config.stall_timeout));
            }
            debug!("not our turn yet, waiting for the other player");
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    async fn fetch_game(&self, url: &Url) -> Result<(String, MatchGame), ReflectError> {
        debug!(%url, "reading game state");
        let raw = self.client.get(url.clone()).send().await?.text().await?;
        match serde_json::from_str::<MatchGame>(&raw) {
            Ok(game) => Ok((raw, game)),
            Err(source) => Err(ReflectError::BadGame { body: raw, source }),
        }
    }

    async fn ask_bot(&self, raw: &str, board: &WireBoard) -> Result<String, ReflectError> {
        let url = self.config.bot_url(board)?;
        debug!(bot = %self.config.bot, "asking bot for a move");
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(raw.to_string())
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "bot answered with an error status");
        }
        Ok(response.text().await?.trim().to_string())
    }

    async fn send_move(&self, reply: &str) -> Result<(), ReflectError> {
        let url = self.config.game_url("/move", Some(("move", reply)));
        self.client.get(url).send().await?;
        Ok(())
    }
}
