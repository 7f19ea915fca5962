// std
use std::sync::Arc;
// crates
use nomos_da_share::context::RequestContext;
use nomos_da_share::error::ShareError;
use nomos_da_share::namespaced::NamespacedShares;
use nomos_da_share::{Module, ShareService};
use nomos_da_square::testutils::{header_for, namespace, ods_from_namespaces};
use nomos_da_square::{ExtendedDataSquare, ExtendedHeader, Namespace, Share, SquareError};
// internal
use crate::common::{MockAvailability, MockGetter, MockHeaders};

async fn shares_by_namespace(
    k: usize,
    layout: impl Fn(usize, usize) -> Namespace,
    target: Namespace,
) -> (NamespacedShares, ExtendedDataSquare, ExtendedHeader) {
    let square = ExtendedDataSquare::extend(ods_from_namespaces(k, layout)).unwrap();
    let header = header_for(1, &square);
    let service = ShareService::new(
        Arc::new(MockGetter::with([(header.data_hash, square.clone())])),
        MockAvailability::default(),
        MockHeaders::default(),
    );
    let shares = service
        .get_shares_by_namespace(&RequestContext::new(), &header, target)
        .await
        .unwrap();
    (shares, square, header)
}

fn verify_rows(shares: &NamespacedShares, namespace: Namespace, header: &ExtendedHeader) {
    for row in shares.iter() {
        let root = header.dah.row_root(row.proof.row()).unwrap();
        row.proof.verify(namespace, &row.shares, root).unwrap();
    }
}

#[tokio::test]
async fn namespace_in_one_row_of_small_square() {
    let target = namespace(42);
    let (shares, square, header) = shares_by_namespace(
        4,
        |row, col| {
            if row == 1 && col <= 1 {
                target
            } else if row == 0 {
                namespace(1)
            } else {
                namespace(100)
            }
        },
        target,
    )
    .await;

    assert_eq!(shares.len(), 1);
    let row = &shares.0[0];
    let expected: Vec<Share> = vec![
        square.share(1, 0).unwrap().clone(),
        square.share(1, 1).unwrap().clone(),
    ];
    assert_eq!(row.shares, expected);
    assert_eq!(row.proof.row(), 1);
    verify_rows(&shares, target, &header);
}

#[tokio::test]
async fn namespace_in_rows_two_and_five() {
    let target = namespace(50);
    let (shares, _, header) = shares_by_namespace(
        8,
        |row, col| match row {
            0..=1 => namespace(10),
            2 if col >= 5 => target,
            2..=4 => namespace(10 + row as u8),
            5 if col < 4 => target,
            _ => namespace(60),
        },
        target,
    )
    .await;

    let rows: Vec<usize> = shares.iter().map(|row| row.proof.row()).collect();
    assert_eq!(rows, vec![2, 5]);
    verify_rows(&shares, target, &header);
}

#[tokio::test]
async fn absent_namespace_is_empty_not_an_error() {
    let (shares, _, _) = shares_by_namespace(4, |_, _| namespace(1), namespace(2)).await;
    assert!(shares.is_empty());
    assert_eq!(serde_json::to_string(&shares).unwrap(), "[]");
}

#[tokio::test]
async fn flatten_concatenates_rows_in_order() {
    let target = namespace(7);
    let (shares, square, _) = shares_by_namespace(
        4,
        |row, col| {
            if (row == 0 && col >= 2) || row == 1 || (row == 2 && col == 0) {
                target
            } else {
                namespace(if row == 0 { 1 } else { 9 })
            }
        },
        target,
    )
    .await;

    assert_eq!(shares.len(), 3);
    let flat = shares.flatten();
    let expected: Vec<Share> = [(0, 2), (0, 3), (1, 0), (1, 1), (1, 2), (1, 3), (2, 0)]
        .into_iter()
        .map(|(row, col)| square.share(row, col).unwrap().clone())
        .collect();
    assert_eq!(flat, expected);
}

#[tokio::test]
async fn interleaved_namespace_is_an_error() {
    let target = namespace(3);
    let square = ExtendedDataSquare::extend(ods_from_namespaces(4, |row, col| {
        if row == 0 && col % 2 == 0 {
            target
        } else {
            namespace(9)
        }
    }))
    .unwrap();
    let header = header_for(1, &square);
    let service = ShareService::new(
        Arc::new(MockGetter::with([(header.data_hash, square)])),
        MockAvailability::default(),
        MockHeaders::default(),
    );

    let error = service
        .get_shares_by_namespace(&RequestContext::new(), &header, target)
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        ShareError::Square(ref e) if matches!(**e, SquareError::NamespaceNotContiguous { row: 0 })
    ));
}

#[tokio::test]
async fn returned_rows_carry_their_boundaries() {
    let target = namespace(20);
    let (shares, square, header) = shares_by_namespace(
        4,
        |row, col| {
            if row == 1 && (1..3).contains(&col) {
                target
            } else {
                namespace(if row < 1 { 10 } else { 30 })
            }
        },
        target,
    )
    .await;

    let proof = &shares.0[0].proof;
    assert_eq!(proof.before.as_ref().map(|b| &b.share), square.share(1, 0));
    assert_eq!(proof.after.as_ref().map(|b| &b.share), square.share(1, 3));
    verify_rows(&shares, target, &header);

    // a run cut short fails against the same row root
    let root = header.dah.row_root(1).unwrap();
    assert!(proof.verify(target, &shares.0[0].shares[..1], root).is_err());
}
