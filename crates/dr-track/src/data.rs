//! Raw trajectory samples and the facing transition matrix.
//!
//! Offsets are leptons relative to the centre of the head-to cell; +y is
//! south.  Every track ends on a `(0, 0)` terminator sample.

use dr_core::Dir;

use crate::flags::TrackFlags;
use crate::raw::{RawTrack, TrackSample};
use crate::transition::TransitionEntry;

const fn s(x: i16, y: i16, dir: u8) -> TrackSample {
    TrackSample { x, y, dir: Dir(dir) }
}

/// Track 1: straight north.
static TRACK_1: [TrackSample; 24] = [
    s(    0,   245,   0),
    s(    0,   234,   0),
    s(    0,   223,   0),
    s(    0,   212,   0),
    s(    0,   201,   0),
    s(    0,   190,   0),
    s(    0,   179,   0),
    s(    0,   168,   0),
    s(    0,   157,   0),
    s(    0,   146,   0),
    s(    0,   135,   0),
    s(    0,   124,   0),
    s(    0,   113,   0),
    s(    0,   102,   0),
    s(    0,    91,   0),
    s(    0,    80,   0),
    s(    0,    69,   0),
    s(    0,    58,   0),
    s(    0,    47,   0),
    s(    0,    36,   0),
    s(    0,    25,   0),
    s(    0,    14,   0),
    s(    0,     3,   0),
    s(    0,     0,   0),
];

/// Track 2: straight north-east.
static TRACK_2: [TrackSample; 32] = [
    s( -248,   248,  32),
    s( -240,   240,  32),
    s( -232,   232,  32),
    s( -224,   224,  32),
    s( -216,   216,  32),
    s( -208,   208,  32),
    s( -200,   200,  32),
    s( -192,   192,  32),
    s( -184,   184,  32),
    s( -176,   176,  32),
    s( -168,   168,  32),
    s( -160,   160,  32),
    s( -152,   152,  32),
    s( -144,   144,  32),
    s( -136,   136,  32),
    s( -128,   128,  32),
    s( -120,   120,  32),
    s( -112,   112,  32),
    s( -104,   104,  32),
    s(  -96,    96,  32),
    s(  -88,    88,  32),
    s(  -80,    80,  32),
    s(  -72,    72,  32),
    s(  -64,    64,  32),
    s(  -56,    56,  32),
    s(  -48,    48,  32),
    s(  -40,    40,  32),
    s(  -32,    32,  32),
    s(  -24,    24,  32),
    s(  -16,    16,  32),
    s(   -8,     8,  32),
    s(    0,     0,  32),
];

/// Track 3: north to north-east, two cells.
static TRACK_3: [TrackSample; 55] = [
    s( -256,   501,   0),
    s( -256,   490,   0),
    s( -256,   479,   0),
    s( -256,   468,   0),
    s( -256,   457,   0),
    s( -256,   446,   0),
    s( -256,   435,   0),
    s( -256,   424,   0),
    s( -256,   413,   0),
    s( -256,   402,   0),
    s( -256,   391,   0),
    s( -256,   384,   0),
    s( -256,   373,   0),  // 12: entry
    s( -256,   363,   0),
    s( -254,   352,   1),
    s( -252,   341,   3),
    s( -250,   332,   4),
    s( -248,   321,   5),
    s( -245,   311,   7),
    s( -241,   302,   8),
    s( -237,   292,   9),
    s( -233,   282,  11),
    s( -229,   272,  12),  // 22: cell
    s( -225,   263,  13),
    s( -220,   252,  15),
    s( -216,   243,  16),
    s( -212,   236,  17),
    s( -206,   224,  19),
    s( -202,   215,  20),
    s( -195,   207,  21),
    s( -190,   198,  23),
    s( -183,   186,  24),
    s( -179,   176,  25),
    s( -168,   168,  27),
    s( -160,   160,  28),
    s( -152,   152,  29),
    s( -144,   144,  31),
    s( -136,   136,  32),  // 37: jump
    s( -128,   128,  32),
    s( -120,   120,  32),
    s( -112,   112,  32),
    s( -104,   104,  32),
    s(  -96,    96,  32),
    s(  -88,    88,  32),
    s(  -80,    80,  32),
    s(  -72,    72,  32),
    s(  -64,    64,  32),
    s(  -56,    56,  32),
    s(  -48,    48,  32),
    s(  -40,    40,  32),
    s(  -32,    32,  32),
    s(  -24,    24,  32),
    s(  -16,    16,  32),
    s(   -8,     8,  32),
    s(    0,     0,  32),
];

/// Track 4: north to east, two cells.
static TRACK_4: [TrackSample; 39] = [
    s( -256,   245,   0),
    s( -256,   235,   0),
    s( -256,   224,   0),
    s( -256,   213,   0),
    s( -255,   203,   0),
    s( -253,   192,   0),
    s( -251,   181,   1),
    s( -249,   171,   1),
    s( -246,   160,   2),
    s( -243,   149,   3),
    s( -240,   139,   4),
    s( -236,   128,   5),  // 11: entry
    s( -232,   117,   8),
    s( -228,   109,  12),
    s( -222,    99,  16),
    s( -219,    90,  20),
    s( -213,    82,  23),
    s( -206,    72,  27),
    s( -201,    64,  32),
    s( -195,    56,  36),  // 19: cell
    s( -186,    48,  39),
    s( -177,    43,  43),
    s( -168,    36,  47),
    s( -160,    32,  51),
    s( -147,    27,  54),
    s( -135,    23,  57),
    s( -126,    20,  60),  // 26: jump
    s( -113,    17,  62),
    s( -104,    13,  63),
    s(  -94,     9,  64),
    s(  -84,     6,  64),
    s(  -75,     4,  66),
    s(  -64,     3,  64),
    s(  -53,     2,  64),
    s(  -43,     1,  64),
    s(  -32,     0,  64),
    s(  -21,     0,  64),
    s(  -11,     0,  64),
    s(    0,     0,  64),
];

/// Track 5: north-east to south-east, two cells.
static TRACK_5: [TrackSample; 62] = [
    s( -504,    -8,  32),
    s( -496,   -16,  32),
    s( -488,   -24,  32),
    s( -480,   -32,  32),
    s( -472,   -40,  32),
    s( -464,   -48,  32),
    s( -456,   -56,  32),
    s( -448,   -64,  32),
    s( -440,   -72,  32),
    s( -432,   -80,  32),
    s( -424,   -88,  32),
    s( -416,   -96,  32),
    s( -408,  -104,  32),
    s( -400,  -112,  32),
    s( -392,  -120,  32),
    s( -384,  -128,  32),  // 15: entry
    s( -376,  -136,  32),
    s( -368,  -143,  32),
    s( -361,  -150,  32),
    s( -353,  -158,  32),
    s( -344,  -166,  32),
    s( -336,  -173,  35),
    s( -329,  -181,  38),
    s( -322,  -188,  41),
    s( -316,  -194,  44),
    s( -306,  -199,  47),
    s( -296,  -204,  50),
    s( -288,  -208,  53),
    s( -277,  -211,  56),
    s( -267,  -212,  59),
    s( -256,  -213,  62),
    s( -245,  -212,  66),  // 31: cell
    s( -235,  -211,  69),
    s( -225,  -208,  72),
    s( -216,  -204,  75),
    s( -208,  -199,  78),
    s( -198,  -194,  81),
    s( -188,  -188,  84),
    s( -181,  -181,  87),
    s( -176,  -173,  90),
    s( -168,  -166,  93),
    s( -160,  -158,  96),
    s( -152,  -150,  96),
    s( -144,  -143,  96),
    s( -136,  -136,  96),
    s( -128,  -128,  96),  // 45: jump
    s( -120,  -120,  96),
    s( -112,  -112,  96),
    s( -104,  -104,  96),
    s(  -96,   -96,  96),
    s(  -88,   -88,  96),
    s(  -80,   -80,  96),
    s(  -72,   -72,  96),
    s(  -64,   -64,  96),
    s(  -56,   -56,  96),
    s(  -48,   -48,  96),
    s(  -40,   -40,  96),
    s(  -32,   -32,  96),
    s(  -24,   -24,  96),
    s(  -16,   -16,  96),
    s(   -8,    -8,  96),
    s(    0,     0,  96),
];

/// Track 6: north-east to north, two cells.
static TRACK_6: [TrackSample; 57] = [
    s( -512,   256,  32),
    s( -504,   248,  32),
    s( -496,   240,  32),
    s( -488,   232,  32),
    s( -480,   224,  32),
    s( -472,   216,  32),
    s( -464,   208,  32),
    s( -456,   200,  32),
    s( -448,   192,  32),
    s( -440,   184,  32),
    s( -432,   176,  32),
    s( -424,   168,  32),
    s( -416,   160,  32),
    s( -408,   152,  32),
    s( -400,   144,  32),
    s( -392,   136,  32),
    s( -384,   128,  32),  // 16: entry
    s( -376,   120,  32),
    s( -368,   112,  32),
    s( -360,   104,  32),
    s( -352,    96,  32),
    s( -344,    88,  32),
    s( -338,    85,  32),
    s( -328,    78,  35),
    s( -320,    72,  37),
    s( -311,    66,  40),
    s( -302,    59,  43),
    s( -294,    55,  45),  // 27: cell
    s( -285,    50,  48),
    s( -277,    43,  51),
    s( -267,    38,  53),
    s( -258,    34,  56),
    s( -248,    28,  59),
    s( -238,    25,  61),
    s( -229,    21,  64),
    s( -218,    17,  64),
    s( -208,    14,  64),
    s( -199,    11,  64),
    s( -189,     9,  64),
    s( -178,     7,  64),
    s( -169,     5,  64),
    s( -158,     3,  64),
    s( -147,     1,  64),
    s( -137,     0,  64),
    s( -128,     0,  64),  // 44: jump
    s( -117,     0,  64),
    s( -107,     0,  64),
    s(  -96,     0,  64),
    s(  -85,     0,  64),
    s(  -75,     0,  64),
    s(  -64,     0,  64),
    s(  -53,     0,  64),
    s(  -43,     0,  64),
    s(  -32,     0,  64),
    s(  -21,     0,  64),
    s(  -11,     0,  64),
    s(    0,     0,  64),
];

/// Track 7: pivot north to north-east.
static TRACK_7: [TrackSample; 28] = [
    s(   -1,     6,   0),
    s(   -2,    12,   4),
    s(   -4,    17,   8),
    s(   -6,    24,  12),
    s(  -10,    31,  16),
    s(  -13,    36,  19),
    s(  -16,    43,  22),
    s(   -3,    48,  23),
    s(  -21,    53,  24),
    s(  -24,    56,  25),
    s(  -26,    60,  26),
    s(  -29,    64,  27),
    s(  -32,    67,  28),
    s(  -35,    70,  29),
    s(  -33,    67,  30),
    s(  -31,    64,  30),
    s(  -29,    60,  30),
    s(  -27,    56,  30),
    s(  -25,    53,  31),
    s(  -23,    48,  31),
    s(  -21,    43,  31),
    s(  -19,    36,  31),
    s(  -15,    31,  31),
    s(  -12,    24,  32),
    s(   -9,    17,  32),
    s(   -6,    12,  32),
    s(   -3,     6,  32),
    s(    0,     0,  32),
];

/// Track 8: pivot north-east to east.
static TRACK_8: [TrackSample; 22] = [
    s(   -4,     3,  32),
    s(   -9,     6,  36),
    s(  -15,    10,  40),
    s(  -21,    12,  44),
    s(  -28,    13,  46),
    s(  -36,    14,  48),
    s(  -43,    15,  50),
    s(  -48,    16,  52),
    s(  -55,    17,  54),
    s(  -62,    18,  56),
    s(  -64,    17,  58),
    s(  -62,    16,  60),
    s(  -55,    14,  62),
    s(  -49,    12,  64),
    s(  -43,    10,  64),
    s(  -38,     8,  64),
    s(  -30,     6,  64),
    s(  -23,     4,  64),
    s(  -17,     2,  64),
    s(  -11,     1,  64),
    s(   -7,     0,  64),
    s(    0,     0,  64),
];

/// Track 9: pivot north to east.
static TRACK_9: [TrackSample; 31] = [
    s(    2,   -11,   0),
    s(    4,   -21,   2),
    s(    6,   -32,   4),
    s(    9,   -43,   6),
    s(   12,   -50,   9),
    s(   15,   -56,  11),
    s(   18,   -64,  13),
    s(   21,   -72,  16),
    s(   18,   -64,  18),
    s(   14,   -56,  20),
    s(   10,   -50,  22),
    s(    4,   -43,  24),
    s(    0,   -34,  26),
    s(   -8,   -23,  28),
    s(  -14,   -18,  30),
    s(  -21,   -11,  32),
    s(  -31,    -3,  34),
    s(  -40,     2,  36),
    s(  -46,     7,  39),
    s(  -53,    11,  41),
    s(  -59,    16,  43),
    s(  -66,    19,  45),
    s(  -73,    21,  48),
    s(  -66,    19,  50),
    s(  -59,    17,  52),
    s(  -52,    11,  54),
    s(  -44,     8,  56),
    s(  -33,     5,  58),
    s(  -21,     3,  62),
    s(  -11,     1,  64),
    s(    0,     0,  64),
];

/// Track 10: pivot north-east to south-east.
static TRACK_10: [TrackSample; 28] = [
    s(   11,   -10,  32),
    s(   21,   -16,  37),
    s(   32,   -21,  42),
    s(   43,   -23,  47),
    s(   50,   -27,  52),
    s(   56,   -29,  57),
    s(   64,   -32,  60),
    s(   56,   -30,  62),
    s(   50,   -28,  64),
    s(   42,   -27,  68),
    s(   30,   -26,  70),
    s(   21,   -25,  72),
    s(   11,   -24,  74),
    s(    0,   -23,  76),
    s(  -11,   -24,  78),
    s(  -21,   -25,  80),
    s(  -32,   -26,  82),
    s(  -43,   -27,  84),
    s(  -50,   -28,  86),
    s(  -59,   -30,  88),
    s(  -64,   -32,  90),
    s(  -59,   -29,  92),
    s(  -50,   -27,  94),
    s(  -43,   -23,  95),
    s(  -32,   -21,  96),
    s(  -21,   -16,  96),
    s(  -11,   -10,  96),
    s(    0,     0,  96),
];

/// Track 11: reverse into refinery.
static TRACK_11: [TrackSample; 14] = [
    s(    0,   256, 160),
    s(    8,   243, 160),
    s(   16,   229, 152),
    s(   24,   214, 152),
    s(   32,   200, 152),
    s(   40,   185, 152),
    s(   48,   171, 144),
    s(   56,   156, 144),
    s(   64,   141, 144),
    s(   72,   127, 144),
    s(   80,   113, 144),
    s(   88,   100, 144),
    s(   96,    85, 144),
    s(    0,     0, 144),
];

/// Track 12: drive back into refinery.
static TRACK_12: [TrackSample; 13] = [
    s(   96,  -171, 144),
    s(   88,  -156, 144),
    s(   80,  -143, 144),
    s(   72,  -129, 144),
    s(   64,  -115, 144),
    s(   56,  -100, 144),
    s(   48,   -85, 144),
    s(   40,   -71, 152),
    s(   32,   -56, 152),
    s(   24,   -42, 152),
    s(   16,   -27, 152),
    s(    8,   -13, 160),
    s(    0,     0, 160),
];

/// Track 13: drive out of weapons factory.
static TRACK_13: [TrackSample; 36] = [
    s(    0,  -373, 128),
    s(    0,  -363, 128),
    s(    0,  -352, 128),
    s(    0,  -341, 128),
    s(    0,  -331, 128),
    s(    0,  -320, 128),
    s(    0,  -309, 128),
    s(    0,  -299, 128),
    s(    0,  -288, 128),
    s(    0,  -277, 128),
    s(    0,  -267, 128),
    s(    0,  -256, 128),
    s(    0,  -245, 128),
    s(    0,  -235, 128),
    s(    0,  -224, 128),
    s(    0,  -213, 128),
    s(    0,  -203, 128),
    s(    0,  -192, 128),
    s(    0,  -181, 128),
    s(    0,  -171, 128),
    s(    0,  -160, 128),
    s(    0,  -149, 128),
    s(    0,  -139, 128),
    s(    0,  -128, 128),
    s(    0,  -117, 128),
    s(    0,  -107, 128),
    s(    0,   -96, 128),
    s(    0,   -85, 128),
    s(    0,   -75, 128),
    s(    0,   -64, 128),
    s(    0,   -53, 128),
    s(    0,   -43, 128),
    s(    0,   -32, 128),
    s(    0,   -21, 128),
    s(    0,   -11, 128),
    s(    0,     0, 128),
];

pub(crate) static RAW_TRACKS: [RawTrack; 13] = [
    RawTrack { samples: &TRACK_1,  jump: None,     entry: None,     cell: None },
    RawTrack { samples: &TRACK_2,  jump: None,     entry: None,     cell: None },
    RawTrack { samples: &TRACK_3,  jump: Some(37), entry: Some(12), cell: Some(22) },
    RawTrack { samples: &TRACK_4,  jump: Some(26), entry: Some(11), cell: Some(19) },
    RawTrack { samples: &TRACK_5,  jump: Some(45), entry: Some(15), cell: Some(31) },
    RawTrack { samples: &TRACK_6,  jump: Some(44), entry: Some(16), cell: Some(27) },
    RawTrack { samples: &TRACK_7,  jump: None,     entry: None,     cell: None },
    RawTrack { samples: &TRACK_8,  jump: None,     entry: None,     cell: None },
    RawTrack { samples: &TRACK_9,  jump: None,     entry: None,     cell: None },
    RawTrack { samples: &TRACK_10, jump: None,     entry: None,     cell: None },
    RawTrack { samples: &TRACK_11, jump: None,     entry: None,     cell: None },
    RawTrack { samples: &TRACK_12, jump: None,     entry: None,     cell: None },
    RawTrack { samples: &TRACK_13, jump: None,     entry: None,     cell: None },
];

const fn t(track: u8, short_track: u8, facing: Dir, flags: TrackFlags) -> TransitionEntry {
    TransitionEntry { track, short_track, facing, flags }
}

const NONE: TrackFlags = TrackFlags::empty();
const T: TrackFlags = TrackFlags::TRANSPOSE;
const X: TrackFlags = TrackFlags::MIRROR_X;
const Y: TrackFlags = TrackFlags::MIRROR_Y;
const D: TrackFlags = TrackFlags::DOUBLE;

/// Indexed by `current * 8 + next`; entries 64..67 are the docking manoeuvres.
pub(crate) static TRANSITIONS: [TransitionEntry; 67] = [
    t( 1,  0, Dir::N,   NONE),                           // N-N
    t( 3,  7, Dir::NE,  D),                              // N-NE
    t( 4,  9, Dir::E,   D),                              // N-E
    t( 0,  0, Dir::SE,  NONE),                           // N-SE
    t( 0,  0, Dir::S,   NONE),                           // N-S
    t( 0,  0, Dir::SW,  NONE),                           // N-SW
    t( 4,  9, Dir::W,   X.union(D)),                     // N-W
    t( 3,  7, Dir::NW,  X.union(D)),                     // N-NW
    t( 6,  8, Dir::N,   T.union(X).union(Y).union(D)),   // NE-N
    t( 2,  0, Dir::NE,  NONE),                           // NE-NE
    t( 6,  8, Dir::E,   D),                              // NE-E
    t( 5, 10, Dir::SE,  D),                              // NE-SE
    t( 0,  0, Dir::S,   NONE),                           // NE-S
    t( 0,  0, Dir::SW,  NONE),                           // NE-SW
    t( 0,  0, Dir::W,   NONE),                           // NE-W
    t( 5, 10, Dir::NW,  T.union(X).union(Y).union(D)),   // NE-NW
    t( 4,  9, Dir::N,   T.union(X).union(Y).union(D)),   // E-N
    t( 3,  7, Dir::NE,  T.union(X).union(Y).union(D)),   // E-NE
    t( 1,  0, Dir::E,   T.union(X)),                     // E-E
    t( 3,  7, Dir::SE,  T.union(X).union(D)),            // E-SE
    t( 4,  9, Dir::S,   T.union(X).union(D)),            // E-S
    t( 0,  0, Dir::SW,  NONE),                           // E-SW
    t( 0,  0, Dir::W,   NONE),                           // E-W
    t( 0,  0, Dir::NW,  NONE),                           // E-NW
    t( 0,  0, Dir::N,   NONE),                           // SE-N
    t( 5, 10, Dir::NE,  Y.union(D)),                     // SE-NE
    t( 6,  8, Dir::E,   Y.union(D)),                     // SE-E
    t( 2,  0, Dir::SE,  Y),                              // SE-SE
    t( 6,  8, Dir::S,   T.union(X).union(D)),            // SE-S
    t( 5, 10, Dir::SW,  T.union(X).union(D)),            // SE-SW
    t( 0,  0, Dir::W,   NONE),                           // SE-W
    t( 0,  0, Dir::NW,  NONE),                           // SE-NW
    t( 0,  0, Dir::N,   NONE),                           // S-N
    t( 0,  0, Dir::NE,  NONE),                           // S-NE
    t( 4,  9, Dir::E,   Y.union(D)),                     // S-E
    t( 3,  7, Dir::SE,  Y.union(D)),                     // S-SE
    t( 1,  0, Dir::S,   Y),                              // S-S
    t( 3,  7, Dir::SW,  X.union(Y).union(D)),            // S-SW
    t( 4,  9, Dir::W,   X.union(Y).union(D)),            // S-W
    t( 0,  0, Dir::NW,  NONE),                           // S-NW
    t( 0,  0, Dir::N,   NONE),                           // SW-N
    t( 0,  0, Dir::NE,  NONE),                           // SW-NE
    t( 0,  0, Dir::E,   NONE),                           // SW-E
    t( 5, 10, Dir::SE,  T.union(D)),                     // SW-SE
    t( 6,  8, Dir::S,   T.union(D)),                     // SW-S
    t( 2,  0, Dir::SW,  T),                              // SW-SW
    t( 6,  8, Dir::W,   X.union(Y).union(D)),            // SW-W
    t( 5, 10, Dir::NW,  X.union(Y).union(D)),            // SW-NW
    t( 4,  9, Dir::N,   T.union(Y).union(D)),            // W-N
    t( 0,  0, Dir::NE,  NONE),                           // W-NE
    t( 0,  0, Dir::E,   NONE),                           // W-E
    t( 0,  0, Dir::SE,  NONE),                           // W-SE
    t( 4,  9, Dir::S,   T.union(D)),                     // W-S
    t( 3,  7, Dir::SW,  T.union(D)),                     // W-SW
    t( 1,  0, Dir::W,   T),                              // W-W
    t( 3,  7, Dir::NW,  T.union(Y).union(D)),            // W-NW
    t( 6,  8, Dir::N,   T.union(Y).union(D)),            // NW-N
    t( 5, 10, Dir::NE,  T.union(Y).union(D)),            // NW-NE
    t( 0,  0, Dir::E,   NONE),                           // NW-E
    t( 0,  0, Dir::SE,  NONE),                           // NW-SE
    t( 0,  0, Dir::S,   NONE),                           // NW-S
    t( 5, 10, Dir::SW,  X.union(D)),                     // NW-SW
    t( 6,  8, Dir::W,   X.union(D)),                     // NW-W
    t( 2,  0, Dir::NW,  X),                              // NW-NW
    t(11, 11, Dir::SW,  NONE),                           // reverse into refinery
    t(12, 12, Dir(144), NONE),                           // drive back into refinery
    t(13, 13, Dir::SW,  NONE),                           // drive out of weapons factory
];
