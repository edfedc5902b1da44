// Copyright (c) 2025 Centavo Project.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod transactions;
pub mod goal;
pub mod budget;
pub mod report;
pub mod exporter;
pub mod doctor;
pub mod owner;
