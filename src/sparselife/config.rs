//! Engine configuration.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{trace, warn};

use super::error::Error;

/// Env var consulted for the `randomize` seed when none is configured.
pub const SEED_ENV: &str = "SPARSELIFE_SEED";

#[derive(Clone, Debug, Default)]
pub struct SparseLifeConfig {
    /// Seed for the engine's own `randomize` RNG.
    /// `None` means read `SPARSELIFE_SEED`, falling back to OS entropy.
    pub seed: Option<u64>,
    /// Expected number of live cells. Pre-sizes the live set and the
    /// per-generation scratch buffers; `0` means grow on demand.
    pub capacity: usize,
}

impl SparseLifeConfig {
    /// Seed the `randomize` RNG for reproducible boards.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Pre-size for roughly `n` live cells.
    pub fn capacity(mut self, n: usize) -> Self {
        self.capacity = n;
        self
    }

    /// The configured seed, else a valid `SPARSELIFE_SEED`.
    pub fn resolve_seed(&self) -> Option<u64> {
        if let Some(seed) = self.seed {
            return Some(seed);
        }
        match seed_from_env() {
            Ok(seed) => seed,
            Err(err) => {
                warn!(%err, env = SEED_ENV, "ignoring invalid seed");
                None
            }
        }
    }

    pub(crate) fn build_rng(&self) -> StdRng {
        match self.resolve_seed() {
            Some(seed) => {
                trace!(seed, "seeding randomize rng");
                StdRng::seed_from_u64(seed)
            }
            None => {
                trace!("seeding randomize rng from os entropy");
                entropy_or_clock(StdRng::try_from_os_rng())
            }
        }
    }
}

/// Take the OS-seeded rng, or seed from the wall clock if the OS source
/// failed. A `randomize` board only needs to differ run to run.
fn entropy_or_clock<E: fmt::Display>(os: Result<StdRng, E>) -> StdRng {
    match os {
        Ok(rng) => rng,
        Err(err) => {
            let seed = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default();
            warn!(%err, seed, "os entropy unavailable, seeding randomize rng from clock");
            StdRng::seed_from_u64(seed)
        }
    }
}

/// Read `SPARSELIFE_SEED`. Unset or blank is `Ok(None)`.
pub fn seed_from_env() -> Result<Option<u64>, Error> {
    match std::env::var(SEED_ENV) {
        Ok(v) => parse_seed(&v),
        Err(_) => Ok(None),
    }
}

/// Accepts decimal or `0x`-prefixed hex.
pub fn parse_seed(value: &str) -> Result<Option<u64>, Error> {
    let v = value.trim();
    if v.is_empty() {
        return Ok(None);
    }
    let parsed = match v.strip_prefix("0x").or_else(|| v.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
        None => v.replace('_', "").parse(),
    };
    parsed.map(Some).map_err(|_| Error::InvalidValue {
        name: "seed",
        value: value.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use rand::RngCore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{SEED_ENV, SparseLifeConfig, entropy_or_clock, parse_seed};
    use crate::sparselife::engine::SparseLife;
    use crate::sparselife::error::Error;
    use crate::sparselife::rect::Rect;

    #[test]
    fn builder_sets_fields() {
        let config = SparseLifeConfig::default().seed(7).capacity(1024);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.capacity, 1024);
        assert_eq!(config.resolve_seed(), Some(7));
    }

    #[test]
    fn explicit_seed_gives_reproducible_rng() {
        let config = SparseLifeConfig::default().seed(0x5EED);
        let a = config.build_rng().next_u64();
        let b = config.build_rng().next_u64();
        assert_eq!(a, b);
    }

    #[test]
    fn parses_decimal_and_hex_seeds() {
        assert_eq!(parse_seed("42"), Ok(Some(42)));
        assert_eq!(parse_seed(" 0xA1 "), Ok(Some(0xA1)));
        assert_eq!(parse_seed("0x5EED_1234"), Ok(Some(0x5EED_1234)));
        assert_eq!(parse_seed("1_000"), Ok(Some(1000)));
        assert_eq!(parse_seed("   "), Ok(None));
    }

    #[test]
    fn rejects_garbage_seed() {
        assert_eq!(
            parse_seed("seven"),
            Err(Error::InvalidValue {
                name: "seed",
                value: "seven".to_owned()
            })
        );
        assert!(parse_seed("-1").is_err());
    }

    #[test]
    fn failed_os_entropy_falls_back_to_a_working_rng() {
        let mut rng = entropy_or_clock(Err::<StdRng, _>("no entropy source"));
        let draws: Vec<u64> = (0..4).map(|_| rng.next_u64()).collect();
        assert!(draws.windows(2).any(|w| w[0] != w[1]));

        let mut ok = entropy_or_clock(Ok::<_, Error>(StdRng::seed_from_u64(3)));
        assert_eq!(ok.next_u64(), StdRng::seed_from_u64(3).next_u64());
    }

    // Every env case lives in one test: the variable is process-global and
    // other tests build engines from the default config.
    #[test]
    fn seed_env_drives_default_engine() {
        let rect = Rect::new(-6, 6, -6, 6);

        // SAFETY: no other test reads or writes `SPARSELIFE_SEED` concurrently.
        unsafe { std::env::set_var(SEED_ENV, "0x2A") };
        assert_eq!(SparseLifeConfig::default().resolve_seed(), Some(42));
        let mut from_env = SparseLife::new();
        let mut explicit = SparseLife::with_config(SparseLifeConfig::default().seed(42));
        from_env.randomize(rect);
        explicit.randomize(rect);
        assert_eq!(from_env.to_string(), explicit.to_string());

        // An explicit seed still wins over the env.
        assert_eq!(SparseLifeConfig::default().seed(7).resolve_seed(), Some(7));

        unsafe { std::env::set_var(SEED_ENV, "junk") };
        assert_eq!(SparseLifeConfig::default().resolve_seed(), None);

        unsafe { std::env::remove_var(SEED_ENV) };
        assert_eq!(SparseLifeConfig::default().resolve_seed(), None);
    }
}
