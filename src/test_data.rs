//! Excerpts of the Unicode 15.1 emoji sequence data files, small enough to
//! keep in the test suite while still covering every property of strings.

pub(crate) const EMOJI_SEQUENCES: &str = "\
# emoji-sequences.txt
# Date: 2023-02-01, 02:22:54 GMT
# Version: 15.1
#
# Emoji Sequence Data for UTS #51 (excerpt)

231A..231B    ; Basic_Emoji                  ; watch..hourglass done                                          # E0.6   [2] (⌚..⌛)
1F466..1F469  ; Basic_Emoji                  ; boy..woman                                                     # E0.6   [4] (👦..👩)
1F44D         ; Basic_Emoji                  ; thumbs up                                                      # E0.6   [1] (👍)
1F3F4         ; Basic_Emoji                  ; black flag                                                     # E1.0   [1] (🏴)
00A9 FE0F     ; Basic_Emoji                  ; copyright                                                      # E0.6   [1] (©️)
2764 FE0F     ; Basic_Emoji                  ; red heart                                                      # E0.6   [1] (❤️)

# Total elements: 10

0023 FE0F 20E3; Emoji_Keycap_Sequence        ; keycap: \\x{23}                                                # E0.6   [1] (#️⃣)
002A FE0F 20E3; Emoji_Keycap_Sequence        ; keycap: *                                                      # E2.0   [1] (*️⃣)
0030 FE0F 20E3; Emoji_Keycap_Sequence        ; keycap: 0                                                      # E0.6   [1] (0️⃣)
0031 FE0F 20E3; Emoji_Keycap_Sequence        ; keycap: 1                                                      # E0.6   [1] (1️⃣)
0032 FE0F 20E3; Emoji_Keycap_Sequence        ; keycap: 2                                                      # E0.6   [1] (2️⃣)
0033 FE0F 20E3; Emoji_Keycap_Sequence        ; keycap: 3                                                      # E0.6   [1] (3️⃣)
0034 FE0F 20E3; Emoji_Keycap_Sequence        ; keycap: 4                                                      # E0.6   [1] (4️⃣)
0035 FE0F 20E3; Emoji_Keycap_Sequence        ; keycap: 5                                                      # E0.6   [1] (5️⃣)
0036 FE0F 20E3; Emoji_Keycap_Sequence        ; keycap: 6                                                      # E0.6   [1] (6️⃣)
0037 FE0F 20E3; Emoji_Keycap_Sequence        ; keycap: 7                                                      # E0.6   [1] (7️⃣)
0038 FE0F 20E3; Emoji_Keycap_Sequence        ; keycap: 8                                                      # E0.6   [1] (8️⃣)
0039 FE0F 20E3; Emoji_Keycap_Sequence        ; keycap: 9                                                      # E0.6   [1] (9️⃣)

# Total elements: 12

1F1E9 1F1EA   ; RGI_Emoji_Flag_Sequence      ; flag: Germany                                                  # E0.6   [1] (🇩🇪)
1F1EF 1F1F5   ; RGI_Emoji_Flag_Sequence      ; flag: Japan                                                    # E0.6   [1] (🇯🇵)
1F1FA 1F1F8   ; RGI_Emoji_Flag_Sequence      ; flag: United States                                            # E0.6   [1] (🇺🇸)

# Total elements: 3

1F3F4 E0067 E0062 E0065 E006E E0067 E007F; RGI_Emoji_Tag_Sequence; flag: England                              # E5.0   [1] (🏴󠁧󠁢󠁥󠁮󠁧󠁿)

# Total elements: 1

1F44D 1F3FB   ; RGI_Emoji_Modifier_Sequence  ; thumbs up: light skin tone                                     # E1.0   [1] (👍🏻)
1F44D 1F3FD   ; RGI_Emoji_Modifier_Sequence  ; thumbs up: medium skin tone                                    # E1.0   [1] (👍🏽)

# Total elements: 2

#EOF
";

pub(crate) const EMOJI_ZWJ_SEQUENCES: &str = "\
# emoji-zwj-sequences.txt
# Date: 2023-06-05, 21:39:54 GMT
# Version: 15.1
#
# Emoji ZWJ Sequences for UTS #51 (excerpt)

1F468 200D 1F469 200D 1F467                 ; RGI_Emoji_ZWJ_Sequence  ; family: man, woman, girl              # E2.0   [1] (👨‍👩‍👧)
1F468 200D 1F469 200D 1F467 200D 1F466      ; RGI_Emoji_ZWJ_Sequence  ; family: man, woman, girl, boy         # E2.0   [1] (👨‍👩‍👧‍👦)
1F469 200D 2764 FE0F 200D 1F468             ; RGI_Emoji_ZWJ_Sequence  ; couple with heart: woman, man         # E2.0   [1] (👩‍❤️‍👨)

# Total elements: 3

#EOF
";

/// Parses both excerpts into a table for the pinned version.
pub(crate) fn table() -> crate::SequencePropertyTable {
    let mut data = crate::EmojiSequenceData::parse(EMOJI_SEQUENCES).expect("emoji-sequences.txt");
    data.add_file(EMOJI_ZWJ_SEQUENCES)
        .expect("emoji-zwj-sequences.txt");
    crate::SequencePropertyTable::load(&data, crate::UnicodeVersion::PINNED).expect("table")
}
