use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::fmt::Debug;

// The single source of randomness for a game: bag shuffles, turn order and ids.
pub trait DrawRng {
    // A uniformly chosen index in 0..upper. upper is never 0.
    fn index(&mut self, upper: usize) -> usize;

    fn bytes(&mut self) -> [u8; 16];
}

#[derive(Debug)]
pub struct GameRng {
    rng: StdRng,
}

impl Default for GameRng {
    fn default() -> Self {
        GameRng {
            rng: StdRng::from_entropy(),
        }
    }
}

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        GameRng {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DrawRng for GameRng {
    fn index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }

    fn bytes(&mut self) -> [u8; 16] {
        let mut bytes = [0; 16];
        self.rng.fill_bytes(&mut bytes);
        bytes
    }
}

impl<R: DrawRng + ?Sized> DrawRng for &mut R {
    fn index(&mut self, upper: usize) -> usize {
        (**self).index(upper)
    }

    fn bytes(&mut self) -> [u8; 16] {
        (**self).bytes()
    }
}

// Fisher-Yates, walking down from the end of the slice
pub fn shuffle<T, R: DrawRng + ?Sized>(items: &mut [T], rng: &mut R) {
    for n in (1..items.len()).rev() {
        let k = rng.index(n + 1);
        items.swap(k, n);
    }
}
