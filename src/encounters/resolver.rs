//! # Encounter Resolution
//!
//! Rolls one wilderness encounter through the table chain:
//!
//! 1. Draw a subtable name from the terrain's column of the main table
//! 2. Fix up the generic "Men" subtable for the terrain
//! 3. Draw a monster name from the subtable's column of the sub table
//! 4. Fix up generic monster names to a specific variant
//! 5. Score the monster: NPC archetypes use level plus entourage, everything
//!    else uses number appearing times EHD with the sweep attack reduction

use super::fixups::{
    apply_sweep, fixup_monster, fixup_subtable, npc_level, patch_ehd, roll_entourage,
};
use super::{MonsterColumns, WildTables};
use crate::utils::{parse_decimal_or_zero, parse_int_or_zero, DiceExpression};
use crate::{WildError, WildResult};
use rand::Rng;

/// How an encounter was scored.
#[derive(Debug, Clone, PartialEq)]
pub enum EncounterKind {
    /// Human NPC with followers
    Npc { level: i32, entourage: i32 },
    /// Monster group from the database
    Monster {
        number: i32,
        ehd: i32,
        hit_dice_number: f64,
    },
}

impl EncounterKind {
    /// Total EHD for this result.
    ///
    /// # Examples
    ///
    /// ```
    /// use wildsim::EncounterKind;
    ///
    /// let goblins = EncounterKind::Monster { number: 4, ehd: 10, hit_dice_number: 0.5 };
    /// assert_eq!(goblins.total_ehd(), 10);
    ///
    /// let wizard = EncounterKind::Npc { level: 11, entourage: 20 };
    /// assert_eq!(wizard.total_ehd(), 31);
    /// ```
    pub fn total_ehd(&self) -> i32 {
        match *self {
            EncounterKind::Npc { level, entourage } => level + entourage,
            EncounterKind::Monster {
                number,
                ehd,
                hit_dice_number,
            } => apply_sweep(number.saturating_mul(ehd), hit_dice_number),
        }
    }
}

/// One fully resolved encounter.
#[derive(Debug, Clone, PartialEq)]
pub struct Encounter {
    pub terrain: String,
    /// Subtable after fixup
    pub subtable: String,
    /// Monster after fixup
    pub monster: String,
    pub kind: EncounterKind,
}

impl Encounter {
    /// Total EHD of the encounter.
    pub fn total_ehd(&self) -> i32 {
        self.kind.total_ehd()
    }
}

/// Resolves encounters for a single terrain.
#[derive(Debug, Clone)]
pub struct EncounterResolver<'t> {
    tables: &'t WildTables,
    columns: MonsterColumns,
    terrain: String,
    terrain_col: usize,
}

impl<'t> EncounterResolver<'t> {
    /// Creates a resolver, failing if the terrain is not a main table column.
    pub fn new(
        tables: &'t WildTables,
        terrain: &str,
        columns: MonsterColumns,
    ) -> WildResult<Self> {
        let terrain_col = tables
            .main
            .col_index(terrain)
            .ok_or_else(|| WildError::UnknownTerrain(terrain.to_string()))?;

        Ok(Self {
            tables,
            columns,
            terrain: terrain.to_string(),
            terrain_col,
        })
    }

    /// Terrain this resolver rolls for.
    pub fn terrain(&self) -> &str {
        &self.terrain
    }

    /// Rolls one complete encounter.
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> WildResult<Encounter> {
        let drawn = self.tables.main.random_cell_in_col(self.terrain_col, rng)?;
        let subtable = fixup_subtable(&self.terrain, drawn);
        log::debug!("{}: subtable {} (drawn {})", self.terrain, subtable, drawn);
        self.resolve_subtable(subtable, rng)
    }

    /// Rolls an encounter starting from a named subtable.
    pub fn resolve_subtable<R: Rng + ?Sized>(
        &self,
        subtable: &str,
        rng: &mut R,
    ) -> WildResult<Encounter> {
        let col = self
            .tables
            .sub
            .col_index(subtable)
            .ok_or_else(|| WildError::UnknownSubTable(subtable.to_string()))?;

        let drawn = self.tables.sub.random_cell_in_col(col, rng)?;
        let monster = fixup_monster(drawn, rng);
        log::debug!("{}: monster {} (drawn {})", subtable, monster, drawn);

        let kind = self.score_monster(monster, rng)?;
        Ok(Encounter {
            terrain: self.terrain.clone(),
            subtable: subtable.to_string(),
            monster: monster.to_string(),
            kind,
        })
    }

    /// Scores a specific monster or NPC archetype.
    pub fn score_monster<R: Rng + ?Sized>(
        &self,
        monster: &str,
        rng: &mut R,
    ) -> WildResult<EncounterKind> {
        if let Some(level) = npc_level(monster) {
            return Ok(EncounterKind::Npc {
                level,
                entourage: roll_entourage(rng),
            });
        }

        let monsters = &self.tables.monsters;
        let row = monsters
            .row_index(monster)
            .ok_or_else(|| WildError::UnknownMonster(monster.to_string()))?;
        let field = |col: usize| monsters.cell(row, col).unwrap_or_default();

        let number = DiceExpression::parse(field(self.columns.number)).roll(rng);

        let ehd = patch_ehd(monster, parse_int_or_zero(field(self.columns.ehd)));
        if ehd == 0 {
            log::warn!("Monster with null EHD: {}", monster);
        }

        let hit_dice_number = parse_decimal_or_zero(field(self.columns.hit_dice_number));

        Ok(EncounterKind::Monster {
            number,
            ehd,
            hit_dice_number,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Table;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const MONSTERS: &str = "\
Name,Number,AC,HD,Move,Attacks,Damage,Treasure,Alignment,Type,Level,XP,HDN,EHD
Goblin,4,6,1-1,6,1,1d6,D,Chaotic,Humanoid,1,5,0.5,10
Ogre,2,5,4+1,9,1,1d10,C,Chaotic,Giant,5,200,4,6
\"Dragon, Gold\",1,-1,11,9,3,2d4/3d8,H,Lawful,Dragon,12,3000,11,-
Wolf,-,7,2+2,18,1,1d6,-,Neutral,Animal,3,35,2,2
";

    fn tables(main: &str, sub: &str) -> WildTables {
        WildTables::new(
            Table::parse("main", main).unwrap(),
            Table::parse("sub", sub).unwrap(),
            Table::parse("monsters", MONSTERS).unwrap(),
        )
        .unwrap()
    }

    fn default_tables() -> WildTables {
        tables(
            "Roll,Clear,Mountain\n1,Humanoid,Men\n",
            "Roll,Humanoid,Men Mountain,Men Typical\n1,Goblin,Wizard,Bandit\n",
        )
    }

    #[test]
    fn test_unknown_terrain() {
        let tables = default_tables();
        let err = EncounterResolver::new(&tables, "Moon", MonsterColumns::default()).unwrap_err();
        assert!(matches!(err, WildError::UnknownTerrain(name) if name == "Moon"));
    }

    #[test]
    fn test_sweep_applies_to_small_monsters() {
        let tables = default_tables();
        let resolver = EncounterResolver::new(&tables, "Clear", MonsterColumns::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let encounter = resolver.resolve(&mut rng).unwrap();
        assert_eq!(encounter.subtable, "Humanoid");
        assert_eq!(encounter.monster, "Goblin");
        assert_eq!(
            encounter.kind,
            EncounterKind::Monster {
                number: 4,
                ehd: 10,
                hit_dice_number: 0.5
            }
        );
        assert_eq!(encounter.total_ehd(), 10);
    }

    #[test]
    fn test_large_monsters_use_full_product() {
        let tables = default_tables();
        let resolver = EncounterResolver::new(&tables, "Clear", MonsterColumns::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let kind = resolver.score_monster("Ogre", &mut rng).unwrap();
        assert_eq!(kind.total_ehd(), 12);
    }

    #[test]
    fn test_gold_dragon_gets_patched_ehd() {
        let tables = default_tables();
        let resolver = EncounterResolver::new(&tables, "Clear", MonsterColumns::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let kind = resolver.score_monster("Dragon, Gold", &mut rng).unwrap();
        assert_eq!(
            kind,
            EncounterKind::Monster {
                number: 1,
                ehd: 40,
                hit_dice_number: 11.0
            }
        );
        assert_eq!(kind.total_ehd(), 40);
    }

    #[test]
    fn test_null_number_appearing_scores_zero() {
        let tables = default_tables();
        let resolver = EncounterResolver::new(&tables, "Clear", MonsterColumns::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let kind = resolver.score_monster("Wolf", &mut rng).unwrap();
        assert_eq!(kind.total_ehd(), 0);
    }

    #[test]
    fn test_mountain_men_use_mountain_subtable() {
        let tables = default_tables();
        let resolver =
            EncounterResolver::new(&tables, "Mountain", MonsterColumns::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        let encounter = resolver.resolve(&mut rng).unwrap();
        assert_eq!(encounter.subtable, "Men Mountain");
        assert_eq!(encounter.monster, "Wizard");
        match encounter.kind {
            EncounterKind::Npc { level, entourage } => {
                assert_eq!(level, 11);
                assert!((2..=48).contains(&entourage));
            }
            other => panic!("expected NPC, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_subtable_and_monster() {
        let tables = tables(
            "Roll,Clear,Desert\n1,Lizards,Men\n",
            "Roll,Humanoid,Men Typical\n1,Goblin,Bandit\n",
        );
        let mut rng = StdRng::seed_from_u64(6);

        let clear = EncounterResolver::new(&tables, "Clear", MonsterColumns::default()).unwrap();
        let err = clear.resolve(&mut rng).unwrap_err();
        assert!(matches!(err, WildError::UnknownSubTable(ref name) if name == "Lizards"));
        assert!(err.is_recoverable());

        let desert = EncounterResolver::new(&tables, "Desert", MonsterColumns::default()).unwrap();
        let err = desert.resolve(&mut rng).unwrap_err();
        assert!(matches!(err, WildError::UnknownSubTable(ref name) if name == "Men Desert"));

        let err = clear.resolve_subtable("Men Typical", &mut rng).unwrap_err();
        assert!(matches!(err, WildError::UnknownMonster(ref name) if name == "Bandit"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_seeded_resolution_repeats() {
        let tables = tables(
            "Roll,Clear\n1,Humanoid\n2,Dragons\n3,Men\n",
            "Roll,Humanoid,Dragons,Men Typical\n1,Goblin,Dragon,Lord\n2,Ogre,-,Patriarch\n",
        );
        let resolver = EncounterResolver::new(&tables, "Clear", MonsterColumns::default()).unwrap();

        let run = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..50)
                .map(|_| {
                    resolver
                        .resolve(&mut rng)
                        .map(|encounter| {
                            let ehd = encounter.total_ehd();
                            (encounter.monster, ehd)
                        })
                        .unwrap_or_else(|err| (err.to_string(), 0))
                })
                .collect::<Vec<_>>()
        };

        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_custom_monster_columns() {
        let tables = WildTables::new(
            Table::parse("main", "Roll,Clear\n1,Humanoid\n").unwrap(),
            Table::parse("sub", "Roll,Humanoid\n1,Orc\n").unwrap(),
            Table::parse("monsters", "Name,EHD,HDN,Number\nOrc,3,1,5\n").unwrap(),
        )
        .unwrap();
        let columns = MonsterColumns {
            number: 3,
            hit_dice_number: 2,
            ehd: 1,
        };
        let resolver = EncounterResolver::new(&tables, "Clear", columns).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        // 5 orcs at 3 EHD, one hit die each: 15 / 4
        assert_eq!(resolver.resolve(&mut rng).unwrap().total_ehd(), 3);
    }
}
