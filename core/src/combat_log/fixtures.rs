//! Sample lines captured from real network logs.

pub const ZONE_CHANGE_TRIAL: &str =
    "01|2026-01-03T14:22:22.5320000-06:00|51C|Hell on Rails (Extreme)|f9c7f8c2922cd9e5";

pub const ZONE_CHANGE_CITY: &str =
    "01|2026-01-03T14:22:00.7540000-06:00|3C2|Old Sharlayan|a1ce20e7c8ad3193";

pub const ADD_COMBATANT_PLAYER: &str = "03|2026-01-03T14:22:00.7540000-06:00|1075762D|Jalapeno Jeff|21|64|\
0000|28|Jenova|0|0|174686|174686|10000|10000|||\
28.29|-33.82|2.46|-0.74|c3899f731f15d677";

pub const ADD_COMBATANT_ENEMY: &str = "03|2026-01-03T14:22:28.0000000-06:00|4000A132|Doomtrain|00|FF|\
0000|00||0|0|98895160|98895160|10000|10000|||\
100.00|75.00|0.00|0.00|abcd1234";

pub const ABILITY_ENEMY_TO_PLAYER: &str = "21|2026-01-03T14:23:32.6960000-06:00|4000A13D|Doomtrain|B26F|\
Dead Man's Blastpipe|106ECCE2|Alfredo Saus|750603|A8450000|\
100140E|6FD0000|1B|B26F8000|0|0|0|0|0|0|0|0|0|0|287465|287465|\
10000|10000|||99.17|85.50|0.00|3.07|44|44|0|10000|||\
100.00|75.00|0.00|0.00|00002C2D|0|1|00||01|B26F|B26F|1.100|7FFF|\
f5784169a26a7ce9";

pub const ABILITY_PLAYER_TO_ENEMY: &str = "21|2026-01-03T14:22:49.6410000-06:00|10764E7E|Sir Bj|1CD8|\
Holy Spirit|4000A132|Doomtrain|750003|5E3F0000|200004|A19F8000|\
0|0|0|0|0|0|0|0|0|0|98895160|98895160|10000|10000|||\
100.00|75.00|0.00|0.00|294990|294990|10000|10000|||\
99.05|100.63|0.00|3.10|00002AA5|0|1|00||01|1CD8|1CD8|0.100|FE7B|\
be4d0e04d9ea8a41";

pub const ABILITY_AUTO_ATTACK: &str = "21|2026-01-03T14:22:50.0000000-06:00|4000A132|Doomtrain|0000|\
Attack|10764E7E|Sir Bj|750003|1000000|0|0|0|0|0|0|0|0|0|0|0|0|0|0|\
294990|294990|10000|10000|||100.00|75.00|0.00|0.00|294990|294990|\
10000|10000|||99.05|100.63|0.00|3.10|00002AA5|0|1|00|";

pub const DEATH: &str =
    "25|2026-01-03T14:24:30.8900000-06:00|10719475|Gyodo Ohta|4000A13D|Doomtrain|1594c95763aee893";

pub const DEBUFF_FROM_ENEMY: &str = "26|2026-01-03T14:23:00.0000000-06:00|ABC|Vulnerability Up|15.00|\
4000A132|Doomtrain|10764E7E|Sir Bj|02|294990|294990|hash123";

pub const DEBUFF_FROM_ENVIRONMENT: &str = "26|2026-01-03T14:23:00.0000000-06:00|DEF|Doom|10.00|\
E0000000||10764E7E|Sir Bj|01|294990|294990|hash456";

pub const RAMPART: &str = "26|2026-01-03T14:23:30.0000000-06:00|4a7|Rampart|20.00|\
106ECCE2|Alfredo Saus|106ECCE2|Alfredo Saus|00|287465|287465|hash789";

pub const REPRISAL: &str = "26|2026-01-03T14:23:30.0000000-06:00|4A9|Reprisal|15.00|\
106ECCE2|Alfredo Saus|4000A13D|Doomtrain|00|98895160|98895160|hashdef";

pub const COMMENCE: &str =
    "33|2026-01-03T14:22:28.9740000-06:00|80034E8B|40000001|E10|00|00|00|34e379559349eb4c";

pub const VICTORY: &str =
    "33|2026-01-03T14:31:35.8570000-06:00|80034E8B|40000003|00|00|00|00|de41720e572dce97";

pub const WIPE: &str =
    "33|2026-01-03T15:21:02.2600000-06:00|80037569|40000005|00|00|00|00|f8bb8ab23c289094";

pub const BARRIER_UP: &str =
    "33|2026-01-03T15:21:10.0000000-06:00|80037569|40000011|00|00|00|00|hash789";

pub const RECOMMENCE: &str =
    "33|2026-01-03T15:21:15.0000000-06:00|80037569|40000006|00|00|00|00|hashabc";

pub const EFFECT_RESULT: &str =
    "37|2026-01-03T14:23:32.7500000-06:00|106ECCE2|Alfredo Saus|00002C2D|244388|287465|10000|10000|0|hash";

pub const CAST_AT_PLAYER: &str = "20|2026-01-03T14:23:28.0000000-06:00|4000A13D|Doomtrain|B26F|\
Dead Man's Blastpipe|106ECCE2|Alfredo Saus|4.700|100.00|75.00|0.00|0.00|hash";

pub const HEAD_MARKER_STACK: &str =
    "27|2026-01-03T14:23:20.0000000-06:00|106ECCE2|Alfredo Saus|0000|0000|0064|0000|0000|0000|hash";
