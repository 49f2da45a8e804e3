//! Reward and currency meta-game: wallets, win payouts, lucky chest.

use serde::Serialize;

use crate::events::Notification;
use crate::rng::Rng;
use crate::state::PlayerId;

/// Per-player currency balances.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Wallet {
    pub coins: u64,
    pub gems: u64,
    pub gold_bars: u64,
}

/// One pull from the lucky chest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChestReward {
    Coins(u32),
    /// Next win reward is doubled.
    DoubleRewards,
    /// Next win reward is quintupled.
    QuintupleRewards,
    GoldBars(u32),
}

pub struct MetaState {
    wallets: [Wallet; 2],
    /// Multiplier applied to the next win payout, then reset.
    pending_multiplier: u32,
    rng: Rng,
}

impl MetaState {
    pub fn new(seed: u64) -> Self {
        Self {
            wallets: [Wallet::default(), Wallet::default()],
            pending_multiplier: 1,
            rng: Rng::new(seed),
        }
    }

    pub fn wallet(&self, player: PlayerId) -> &Wallet {
        &self.wallets[player.index()]
    }

    pub fn grant_coins(&mut self, player: PlayerId, coins: u64) {
        self.wallets[player.index()].coins += coins;
    }

    /// Pay out a match win: 500-1499 base coins, scaled by the winner's
    /// VIP multiplier and any pending chest multiplier.
    pub fn award_win(&mut self, winner: PlayerId, vip_multiplier: f32) -> (u64, Notification) {
        let base = self.rng.range(500, 1500) as u64;
        let reward =
            (base as f32 * vip_multiplier).round() as u64 * self.pending_multiplier as u64;
        self.pending_multiplier = 1;
        self.wallets[winner.index()].coins += reward;
        (reward, Notification::success(format!("+{} coins", reward)))
    }

    /// Open the lucky chest for a player.
    pub fn open_chest(&mut self, player: PlayerId) -> (ChestReward, Notification) {
        let reward = match self.rng.next_int(4) {
            0 => ChestReward::Coins(self.rng.range(50, 150)),
            1 => ChestReward::DoubleRewards,
            2 => ChestReward::QuintupleRewards,
            _ => ChestReward::GoldBars(self.rng.range(5, 15)),
        };

        let wallet = &mut self.wallets[player.index()];
        let notification = match reward {
            ChestReward::Coins(n) => {
                wallet.coins += n as u64;
                Notification::success(format!("You won {} coins!", n))
            }
            ChestReward::DoubleRewards => {
                self.pending_multiplier = 2;
                Notification::success("Double rewards on your next win!")
            }
            ChestReward::QuintupleRewards => {
                self.pending_multiplier = 5;
                Notification::success("Quintuple rewards on your next win!")
            }
            ChestReward::GoldBars(n) => {
                wallet.gold_bars += n as u64;
                Notification::success(format!("Special prize: {} gold bars!", n))
            }
        };
        (reward, notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_reward_is_in_range_and_credited() {
        let mut meta = MetaState::new(11);
        let (reward, _) = meta.award_win(PlayerId::One, 1.0);
        assert!((500..1500).contains(&(reward as u32)));
        assert_eq!(meta.wallet(PlayerId::One).coins, reward);
        assert_eq!(meta.wallet(PlayerId::Two).coins, 0);
    }

    #[test]
    fn vip_multiplier_scales_payout() {
        let (plain, _) = MetaState::new(3).award_win(PlayerId::One, 1.0);
        let (vip, _) = MetaState::new(3).award_win(PlayerId::One, 1.25);
        assert_eq!(vip, (plain as f32 * 1.25).round() as u64);
    }

    #[test]
    fn chest_multiplier_applies_once() {
        let mut meta = MetaState::new(5);
        meta.pending_multiplier = 2;
        let (first, _) = meta.award_win(PlayerId::One, 1.0);
        assert_eq!(first % 2, 0);
        assert!(first >= 1000);
        // The multiplier was consumed.
        let (second, _) = meta.award_win(PlayerId::One, 1.0);
        assert!(second < 1500);
    }

    #[test]
    fn chest_rewards_stay_in_their_ranges() {
        let mut meta = MetaState::new(99);
        for _ in 0..200 {
            match meta.open_chest(PlayerId::One).0 {
                ChestReward::Coins(n) => assert!((50..150).contains(&n)),
                ChestReward::GoldBars(n) => assert!((5..15).contains(&n)),
                ChestReward::DoubleRewards | ChestReward::QuintupleRewards => {}
            }
        }
        assert!(meta.wallet(PlayerId::One).coins > 0);
    }
}
