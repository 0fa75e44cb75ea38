//! Moving a seated player from one table to another.

use std::ops::{Deref, DerefMut};

use crate::table::{PlayerId, PokerTable, TableError, TableResult};

/// Keeps a table open for mutation and closes it when dropped, including
/// when a transfer bails out half way.
pub(crate) struct MutationGuard<'a> {
    table: &'a mut dyn PokerTable,
}

impl<'a> MutationGuard<'a> {
    pub(crate) fn open(table: &'a mut dyn PokerTable) -> Self {
        table.open();
        Self { table }
    }
}

impl<'a> Deref for MutationGuard<'a> {
    type Target = dyn PokerTable + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.table
    }
}

impl DerefMut for MutationGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.table
    }
}

impl Drop for MutationGuard<'_> {
    fn drop(&mut self) {
        self.table.close();
    }
}

/// Seat `player` at `to` with the exact stack and flags they had at `from`,
/// then remove them from `from`.
///
/// The player is paid before being seated so `to` never holds them with an
/// empty stack, and is only removed from `from` once `to` has them.
pub fn move_player(
    from: &mut dyn PokerTable,
    to: &mut dyn PokerTable,
    player: PlayerId,
) -> TableResult<()> {
    let mut from = MutationGuard::open(from);
    let mut to = MutationGuard::open(to);

    let info = from.player(player).ok_or(TableError::PlayerNotFound {
        table: from.id(),
        player,
    })?;

    to.add_player(player)?;
    to.pay_buy_in(player, info.stack)?;
    to.sit(player)?;
    to.auto_blind_ante(player)?;
    to.set_player_name(player, &info.name)?;
    if info.sit_out {
        to.sit_out(player)?;
    }
    if info.bot {
        to.set_bot(player)?;
    }

    from.remove_player(player)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{MemoryTable, TableSpec};

    fn seated(id: i64, players: &[(PlayerId, i64)]) -> MemoryTable {
        let mut table = MemoryTable::new(TableSpec::default());
        table.set_id(id);
        for &(player, stack) in players {
            table.add_player(player).unwrap();
            table.pay_buy_in(player, stack).unwrap();
            table.sit(player).unwrap();
        }
        table.close();
        table
    }

    #[test]
    fn test_move_keeps_stack_and_flags() {
        let mut from = seated(1, &[(7, 2750), (8, 250)]);
        let mut to = seated(2, &[(9, 1500)]);
        from.set_player_name(7, "alice").unwrap();
        from.sit_out(7).unwrap();
        from.set_bot(7).unwrap();

        move_player(&mut from, &mut to, 7).unwrap();

        assert!(from.player(7).is_none());
        let moved = to.player(7).unwrap();
        assert_eq!(moved.stack, 2750);
        assert_eq!(moved.name, "alice");
        assert!(moved.sit_out);
        assert!(moved.bot);
        assert!(to.is_seated(7));
        assert!(to.is_auto_blind_ante(7));
        assert_eq!(from.total_chips() + to.total_chips(), 250 + 2750 + 1500);
    }

    #[test]
    fn test_move_closes_tables_on_failure() {
        let mut from = seated(1, &[(7, 100)]);
        let mut to = seated(2, &[(7, 100)]);

        let err = move_player(&mut from, &mut to, 7).unwrap_err();

        assert!(matches!(err, TableError::PlayerAlreadySeated { player: 7, .. }));
        assert!(!from.is_open());
        assert!(!to.is_open());
        assert!(from.player(7).is_some());
    }

    #[test]
    fn test_move_unknown_player() {
        let mut from = seated(1, &[]);
        let mut to = seated(2, &[]);

        assert_eq!(
            move_player(&mut from, &mut to, 3),
            Err(TableError::PlayerNotFound {
                table: 1,
                player: 3
            })
        );
    }
}
