use super::init::{bishop_ray_attacks, bishop_relevant_blockers, rook_ray_attacks, rook_relevant_blockers};
use crate::core::*;
use std::sync::LazyLock;

/******************************************\
|==========================================|
|             Magics Definition            |
|==========================================|
\******************************************/

/// Multiply-shift perfect hash of one square's relevant blockers into its slice
/// of the shared attack table
#[derive(Debug, Default, Clone, Copy)]
pub struct Magic {
    magic: u64,

    mask: Bitboard,

    shift: u8,

    offset: usize,
}

impl Magic {
    const EMPTY: Magic = Magic {
        magic: 0,
        mask: Bitboard::EMPTY,
        shift: 0,
        offset: 0,
    };

    #[inline]
    pub(crate) const fn index(self, occ: Bitboard) -> usize {
        ((occ.0 & self.mask.0).wrapping_mul(self.magic)).wrapping_shr(self.shift as u32) as usize
            + self.offset
    }
}

pub type MagicTable = [Magic; Square::NUM];

pub const BISHOP_MAGICS: MagicTable = populate_magic_table(PieceType::Bishop);

pub const ROOK_MAGICS: MagicTable = populate_magic_table(PieceType::Rook);

const BISHOP_TABLE_SIZE: usize = table_size(&BISHOP_INDEX_BITS);

const ROOK_TABLE_SIZE: usize = table_size(&ROOK_INDEX_BITS);

pub static BISHOP_TABLE: LazyLock<Box<[Bitboard]>> = LazyLock::new(|| {
    log::debug!("building bishop attack table ({BISHOP_TABLE_SIZE} entries)");
    populate_attack_table(PieceType::Bishop, BISHOP_TABLE_SIZE).into_boxed_slice()
});

pub static ROOK_TABLE: LazyLock<Box<[Bitboard]>> = LazyLock::new(|| {
    log::debug!("building rook attack table ({ROOK_TABLE_SIZE} entries)");
    populate_attack_table(PieceType::Rook, ROOK_TABLE_SIZE).into_boxed_slice()
});

pub fn init_magic_tables() {
    LazyLock::force(&BISHOP_TABLE);
    LazyLock::force(&ROOK_TABLE);
}

/******************************************\
|==========================================|
|               Magic Numbers              |
|==========================================|
\******************************************/

pub(super) const BISHOP_MAGIC_NUMS: [u64; 64] = [
    0x89a1121896040240, 0x2004844802002010, 0x2068080051921000, 0x62880a0220200808,
    0x4042004000000, 0x100822020200011, 0xc00444222012000a, 0x28808801216001,
    0x400492088408100, 0x201c401040c0084, 0x840800910a0010, 0x82080240060,
    0x2000840504006000, 0x30010c4108405004, 0x1008005410080802, 0x8144042209100900,
    0x208081020014400, 0x4800201208ca00, 0xf18140408012008, 0x1004002802102001,
    0x841000820080811, 0x40200200a42008, 0x800054042000, 0x88010400410c9000,
    0x520040470104290, 0x1004040051500081, 0x2002081833080021, 0x400c00c010142,
    0x941408200c002000, 0x658810000806011, 0x188071040440a00, 0x4800404002011c00,
    0x104442040404200, 0x511080202091021, 0x4022401120400, 0x80c0040400080120,
    0x8040010040820802, 0x480810700020090, 0x102008e00040242, 0x809005202050100,
    0x8002024220104080, 0x431008804142000, 0x19001802081400, 0x200014208040080,
    0x3308082008200100, 0x41010500040c020, 0x4012020c04210308, 0x208220a202004080,
    0x111040120082000, 0x6803040141280a00, 0x2101004202410000, 0x8200000041108022,
    0x21082088000, 0x2410204010040, 0x40100400809000, 0x822088220820214,
    0x40808090012004, 0x910224040218c9, 0x402814422015008, 0x90014004842410,
    0x1000042304105, 0x10008830412a00, 0x2520081090008908, 0x40102000a0a60140,
];

pub(super) const ROOK_MAGIC_NUMS: [u64; 64] = [
    0xa8002c000108020, 0x6c00049b0002001, 0x100200010090040, 0x2480041000800801,
    0x280028004000800, 0x900410008040022, 0x280020001001080, 0x2880002041000080,
    0xa000800080400034, 0x4808020004000, 0x2290802004801000, 0x411000d00100020,
    0x402800800040080, 0xb000401004208, 0x2409000100040200, 0x1002100004082,
    0x22878001e24000, 0x1090810021004010, 0x801030040200012, 0x500808008001000,
    0xa08018014000880, 0x8000808004000200, 0x201008080010200, 0x801020000441091,
    0x800080204005, 0x1040200040100048, 0x120200402082, 0xd14880480100080,
    0x12040280080080, 0x100040080020080, 0x9020010080800200, 0x813241200148449,
    0x491604001800080, 0x100401000402001, 0x4820010021001040, 0x400402202000812,
    0x209009005000802, 0x810800601800400, 0x4301083214000150, 0x204026458e001401,
    0x40204000808000, 0x8001008040010020, 0x8410820820420010, 0x1003001000090020,
    0x804040008008080, 0x12000810020004, 0x1000100200040208, 0x430000a044020001,
    0x280009023410300, 0x48fffe99fecfaa00, 0x497fffadff9c2e00, 0x613fffddffce9200,
    0xffffffe9ffe7ce00, 0xfffffff5fff3e600, 0x0003ff95e5e6a4c0, 0x510ffff5f63c96a0,
    0xebffffb9ff9fc526, 0x61fffeddfeedaeae, 0x53bfffedffdeb1a2, 0x127fffb9ffdfb5f6,
    0x411fffddffdbf4d6, 0x1004400080a13, 0x0003ffef27eebe74, 0x7645fffecbfea79e,
];

/// Index width per square. A few rook squares use fewer bits than they have
/// relevant blockers; their magics map colliding subsets onto identical attack
/// sets.
#[rustfmt::skip]
const ROOK_INDEX_BITS: [u8; 64] = [
    12, 11, 11, 11, 11, 11, 11, 12,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    11,  9,  9,  9,  9,  9,  9, 10,
    11, 10, 10, 10, 10, 11, 10, 11,
];

#[rustfmt::skip]
const BISHOP_INDEX_BITS: [u8; 64] = [
    6, 5, 5, 5, 5, 5, 5, 6,
    5, 5, 5, 5, 5, 5, 5, 5,
    5, 5, 7, 7, 7, 7, 5, 5,
    5, 5, 7, 9, 9, 7, 5, 5,
    5, 5, 7, 9, 9, 7, 5, 5,
    5, 5, 7, 7, 7, 7, 5, 5,
    5, 5, 5, 5, 5, 5, 5, 5,
    6, 5, 5, 5, 5, 5, 5, 6,
];

/******************************************\
|==========================================|
|        Populating Magic Parameters       |
|==========================================|
\******************************************/

const fn table_size(bits: &[u8; 64]) -> usize {
    let mut size = 0;
    let mut i = 0;
    while i < Square::NUM {
        size += 1 << bits[i];
        i += 1;
    }
    size
}

#[allow(long_running_const_eval)]
const fn populate_magic_table(pt: PieceType) -> MagicTable {
    let mut offset = 0;
    let mut magic = [Magic::EMPTY; Square::NUM];

    let (magic_numbers, index_bits) = match pt {
        PieceType::Bishop => (BISHOP_MAGIC_NUMS, BISHOP_INDEX_BITS),
        PieceType::Rook => (ROOK_MAGIC_NUMS, ROOK_INDEX_BITS),
        _ => panic!("Magic tables exist only for rooks and bishops"),
    };

    let mut i = 0;
    while i < Square::NUM {
        let sq = unsafe { Square::from_unchecked(i as u8) };

        let mask = match pt {
            PieceType::Bishop => bishop_relevant_blockers(sq),
            _ => rook_relevant_blockers(sq),
        };

        magic[i] = Magic {
            magic: magic_numbers[i],
            mask,
            shift: 64 - index_bits[i],
            offset,
        };

        offset += 1 << index_bits[i];

        i += 1;
    }

    magic
}

/// Fills one contiguous table with the attack set of every blocker subset of
/// every square.
///
/// # Panics
///
/// When two subsets of the same square hash to one slot but produce different
/// attack sets. Slider attack sets are never empty, so an empty slot is unset.
fn populate_attack_table(pt: PieceType, size: usize) -> Vec<Bitboard> {
    let mut table = vec![Bitboard::EMPTY; size];

    let (magics, ray_attacks): (&MagicTable, fn(Square, Bitboard) -> Bitboard) = match pt {
        PieceType::Rook => (&ROOK_MAGICS, rook_ray_attacks),
        PieceType::Bishop => (&BISHOP_MAGICS, bishop_ray_attacks),
        _ => panic!("Magic tables exist only for rooks and bishops"),
    };

    for sq in Square::iter() {
        let m = magics[sq.index()];

        // Carry-rippler over every subset of the mask, starting and ending at empty
        let mut occ = Bitboard::EMPTY;
        loop {
            let attack = ray_attacks(sq, occ);
            let slot = &mut table[m.index(occ)];

            if slot.is_occupied() && *slot != attack {
                panic!("Magic collision for {pt:?} on {sq} with blockers {:#x}", occ.0);
            }
            *slot = attack;

            occ = Bitboard(occ.0.wrapping_sub(m.mask.0) & m.mask.0);
            if occ.is_empty() {
                break;
            }
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        assert_eq!(BISHOP_TABLE_SIZE, 5248);
        assert_eq!(ROOK_TABLE_SIZE, 89088);
        assert_eq!(BISHOP_TABLE.len(), BISHOP_TABLE_SIZE);
        assert_eq!(ROOK_TABLE.len(), ROOK_TABLE_SIZE);
    }

    #[test]
    fn test_offsets_are_contiguous() {
        for magics in [&ROOK_MAGICS, &BISHOP_MAGICS] {
            for i in 1..Square::NUM {
                let prev = magics[i - 1];
                assert_eq!(magics[i].offset, prev.offset + (1 << (64 - prev.shift)));
            }
        }
    }

    #[test]
    fn test_index_stays_inside_slice() {
        for sq in Square::iter() {
            let m = ROOK_MAGICS[sq.index()];
            let width = 1usize << (64 - m.shift);
            let idx = m.index(Bitboard::FULL);
            assert!(idx >= m.offset && idx < m.offset + width);
        }
    }
}
