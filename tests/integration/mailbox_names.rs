//
// meli
//
// Copyright 2024 Emmanouil Pitsidianakis <manos@pitsidianak.is>
//
// This file is part of meli.
//
// meli is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// meli is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with meli. If not, see <http://www.gnu.org/licenses/>.
//
// SPDX-License-Identifier: EUPL-1.2 OR GPL-3.0-or-later

use melib_charset::{
    decode_utf7_imap, encode_utf7_imap,
    utf7::{decode_mailbox_name, encode_mailbox_name},
    DecodeError,
};

const MAILBOXES: &[(&str, &str)] = &[
    ("INBOX", "INBOX"),
    ("INBOX/Sent Items", "INBOX/Sent Items"),
    ("[Gmail]/Brouillons", "[Gmail]/Brouillons"),
    ("Gesendete Objekte", "Gesendete Objekte"),
    ("Entwürfe", "Entw&APw-rfe"),
    ("Éléments envoyés", "&AMk-l&AOk-ments envoy&AOk-s"),
    ("Отправленные", "&BB4EQgQ,BEAEMAQyBDsENQQ9BD0ESwQ1-"),
    ("下書き", "&Tgtm+DBN-"),
    ("Tom & Jerry", "Tom &- Jerry"),
    ("~peter/mail/台北/日本語", "~peter/mail/&U,BTFw-/&ZeVnLIqe-"),
];

#[test]
fn test_mailbox_names() {
    for &(name, wire) in MAILBOXES {
        assert_eq!(encode_mailbox_name(name), wire);
        assert_eq!(decode_mailbox_name(wire), name);
        assert_eq!(encode_utf7_imap(name.as_bytes()).unwrap(), wire.as_bytes());
        assert_eq!(decode_utf7_imap(wire.as_bytes()).unwrap(), name.as_bytes());
    }
}

#[test]
fn test_mailbox_names_from_broken_servers() {
    // Names some servers send unencoded, or encoded in non-canonical forms.
    for (wire, err) in [
        ("Entwürfe", DecodeError::InvalidLiteral { position: 4 }),
        ("&AGEAYgBj-", DecodeError::NonCanonical { position: 3 }),
        ("&AOk-&AOk-", DecodeError::AdjacentRuns { position: 5 }),
        ("Tom & Jerry", DecodeError::UnterminatedRun { position: 4 }),
    ] {
        assert_eq!(decode_utf7_imap(wire.as_bytes()), Err(err), "{:?}", wire);
        assert_eq!(decode_mailbox_name(wire), wire);
    }
}
